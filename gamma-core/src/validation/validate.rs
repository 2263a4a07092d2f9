//! Validation logic for cutting-list conversion.
//!
//! Conversion itself never refuses data: overflowing fields are cut and
//! faulty rows skipped. These checks surface both before a file is written.

use serde::Serialize;

use crate::config::MAX_TILT_DEGREES;
use crate::generator::FixedWidthEncoder;
use crate::model::PieceRow;
use crate::pipeline::{build_record, RowCollection};

/// Validation result with warnings.
#[derive(Debug, Default, Serialize)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate extracted rows along with the faults hit while extracting them.
pub fn validate_collection(
    collection: &RowCollection,
    encoder: &FixedWidthEncoder,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for fault in &collection.faults {
        result.add_error(fault.message.clone());
    }

    result.merge(validate_rows(&collection.rows, encoder));
    result
}

/// Validate all rows.
pub fn validate_rows(rows: &[PieceRow], encoder: &FixedWidthEncoder) -> ValidationResult {
    if rows.is_empty() {
        return ValidationResult::error("No pieces found in the cutting list");
    }

    let mut result = ValidationResult::ok();
    for row in rows {
        result.merge(validate_row(row, encoder));
    }
    result
}

/// Validate a single row.
pub fn validate_row(row: &PieceRow, encoder: &FixedWidthEncoder) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let position = format!("Column group {}, row {}", row.column_group + 1, row.row);

    for (name, tilt) in [("Left", row.left_tilt), ("Right", row.right_tilt)] {
        if tilt.unsigned_abs() >= MAX_TILT_DEGREES.unsigned_abs() {
            result.add_warning(format!(
                "{}: {} tilt {} is outside (-{max}, {max})",
                position,
                name,
                tilt,
                max = MAX_TILT_DEGREES
            ));
        }
    }

    if row.length <= 0.0 {
        result.add_warning(format!("{}: Non-positive length {}", position, row.length));
    }

    match build_record(row) {
        Ok(record) => {
            for overflow in encoder.overflows(&record) {
                result.add_warning(format!(
                    "{}: {} '{}' is longer than {} characters and will be cut",
                    position, overflow.field, overflow.text, overflow.width
                ));
            }
        }
        Err(err) => {
            // Left tilt set with a square right end
            result.add_warning(format!("{} (row will be skipped)", err));
        }
    }

    result
}
