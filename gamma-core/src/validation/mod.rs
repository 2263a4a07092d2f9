//! Pre-flight checks on extracted cutting-list rows.

mod validate;

pub use validate::{validate_collection, validate_row, validate_rows, ValidationResult};
