//! Piece definitions: the typed row read from the cutting list and the
//! cut instruction written to the machine.

use serde::{Deserialize, Serialize};

/// One cutting-list row of a column group, coerced from the source cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceRow {
    /// 0-based column group index.
    pub column_group: usize,
    /// 1-based source row.
    pub row: u32,
    /// Profile code.
    pub code: String,
    /// Nominal bar length before miter correction, truncated to whole units.
    pub length: f64,
    /// Profile height, truncated to whole units.
    pub height: f64,
    /// Number of identical pieces.
    pub quantity: u32,
    /// Left miter angle in degrees.
    pub left_tilt: i32,
    /// Right miter angle in degrees.
    pub right_tilt: i32,
    /// Order identifier.
    pub order: String,
    /// Item description.
    pub description: String,
}

/// Which face of the bar carries the miter-corrected length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectedSide {
    External,
    Internal,
    /// Square cut, both lengths nominal.
    None,
}

impl CorrectedSide {
    /// Side selected by the sign of the left tilt.
    pub fn for_left_tilt(left_tilt: i32) -> Self {
        match left_tilt.signum() {
            -1 => CorrectedSide::External,
            1 => CorrectedSide::Internal,
            _ => CorrectedSide::None,
        }
    }
}

/// A single cut instruction for the GAMMA machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieceRecord {
    /// Reserved machine field, empty at generation time.
    pub barcode: String,
    /// Profile code.
    pub code: String,
    /// Nominal bar length.
    pub length: f64,
    /// External cut length.
    pub ext_length: f64,
    /// Internal cut length.
    pub int_length: f64,
    /// Profile height.
    pub height: f64,
    /// Number of identical pieces.
    pub quantity: u32,
    /// Left miter angle in degrees.
    pub left_tilt: i32,
    /// Right miter angle in degrees.
    pub right_tilt: i32,
    pub piece_number: String,
    pub lot: String,
    pub trolley: String,
    /// Order identifier.
    pub order: String,
    pub frame: String,
    pub shutter: String,
    /// Item description.
    pub description: String,
}

impl PieceRecord {
    /// Create a record with both lengths set to the nominal length.
    pub fn new(code: impl Into<String>, length: f64, height: f64) -> Self {
        Self {
            code: code.into(),
            length,
            ext_length: length,
            int_length: length,
            height,
            ..Default::default()
        }
    }

    /// Set both miter angles.
    pub fn set_tilts(&mut self, left: i32, right: i32) {
        self.left_tilt = left;
        self.right_tilt = right;
    }

    /// Side carrying the corrected length.
    pub fn corrected_side(&self) -> CorrectedSide {
        CorrectedSide::for_left_tilt(self.left_tilt)
    }
}
