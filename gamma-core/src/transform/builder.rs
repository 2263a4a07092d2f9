//! Record construction from cutting-list rows.

use crate::error::GeometryError;
use crate::model::{CorrectedSide, PieceRecord, PieceRow};

use super::miter::adjusted_length;

/// Build the machine record for a cutting-list row.
///
/// The sign of the left tilt picks the face that receives the miter
/// correction; the other face keeps the nominal length. A square left end
/// keeps both lengths nominal and skips the geometry entirely.
pub fn build_piece(row: &PieceRow) -> Result<PieceRecord, GeometryError> {
    let mut record = PieceRecord::new(row.code.clone(), row.length, row.height);
    record.quantity = row.quantity;
    record.set_tilts(row.left_tilt, row.right_tilt);
    record.order = row.order.clone();
    record.description = row.description.clone();

    match record.corrected_side() {
        CorrectedSide::External => {
            record.ext_length = corrected_length(row)?;
        }
        CorrectedSide::Internal => {
            record.int_length = corrected_length(row)?;
        }
        CorrectedSide::None => {}
    }

    Ok(record)
}

fn corrected_length(row: &PieceRow) -> Result<f64, GeometryError> {
    adjusted_length(row.left_tilt, row.right_tilt, row.length, row.height)
}
