//! Configuration constants and settings for the converter.

use serde::{Deserialize, Serialize};

/// Default cutting-list workbook, looked up next to the executable.
pub const INPUT_FILE_NAME: &str = "CUTTING_LIST_FOR_GAMMA.xlsx";

/// Worksheet holding the cutting list.
pub const SHEET_NAME: &str = "LIST";

/// Extension appended to the output base name.
pub const OUTPUT_EXTENSION: &str = "txt";

/// Persistent fault log, appended to in the working directory.
pub const FAULT_LOG_FILE: &str = "error_log.txt";

/// Token closing every machine line.
pub const LINE_TERMINATOR: &str = "EXT";

/// Significant digits used when rendering lengths.
pub const LENGTH_SIGNIFICANT_DIGITS: usize = 10;

/// Decimal places kept on a miter-corrected length.
pub const LENGTH_DECIMALS: usize = 1;

/// Tilts at or beyond this magnitude are reported by validation.
pub const MAX_TILT_DEGREES: i32 = 90;

/// Cell positions of the cutting-list sheet (1-based rows and columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Cell holding the order identifier.
    pub order_cell: (u32, u32),
    /// Row holding the profile code of each column group.
    pub code_row: u32,
    /// Row holding the profile height of each column group.
    pub height_row: u32,
    /// Row holding the tilts (left in the quantity column, right in the length column).
    pub tilt_row: u32,
    /// First per-piece row. Also the row scanned for the column extent.
    pub data_start_row: u32,
    /// Column holding descriptions.
    pub description_column: u32,
    /// Quantity column of the first column group.
    pub first_group_column: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            order_cell: (2, 3),
            code_row: 4,
            height_row: 5,
            tilt_row: 6,
            data_start_row: 9,
            description_column: 3,
            first_group_column: 4,
        }
    }
}

impl SheetLayout {
    /// Quantity column of a 0-based column group.
    pub fn quantity_column(&self, group: usize) -> u32 {
        self.first_group_column + 2 * group as u32
    }

    /// Length column of a 0-based column group.
    pub fn length_column(&self, group: usize) -> u32 {
        self.quantity_column(group) + 1
    }

    /// Number of column groups given the last used column of the data start row.
    pub fn group_count(&self, last_column: u32) -> usize {
        (last_column.saturating_sub(self.description_column) / 2) as usize
    }
}

/// Where a field prefix goes relative to the field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrefixPlacement {
    /// Prefix counts inside the field width.
    #[default]
    WithinWidth,
    /// Prefix is written ahead of the padded field, widening it.
    BeforeField,
}

/// Line break written after the terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "LF"),
            LineEnding::CrLf => write!(f, "CRLF"),
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderOptions {
    pub prefix_placement: PrefixPlacement,
    pub line_ending: LineEnding,
}

/// Utility functions for angle operations.
pub mod angle {
    /// Cotangent of an angle given in degrees, `None` where the tangent is zero.
    #[inline]
    pub fn cot_degrees(degrees: f64) -> Option<f64> {
        let tan = degrees.to_radians().tan();
        if tan == 0.0 {
            None
        } else {
            Some(1.0 / tan)
        }
    }
}
