//! gamma-core - Core library for GAMMA angle-cutting command files.
//!
//! This library reads a cutting list (profile codes, lengths, miter angles and
//! quantities laid out in column groups) and generates the fixed-width command
//! file consumed by the GAMMA angle-cutting machine.
//!
//! # Example
//!
//! ```no_run
//! use gamma_core::{convert_cutting_list, write_command_file, EncoderOptions};
//! use std::path::Path;
//!
//! let result = convert_cutting_list(
//!     Path::new("CUTTING_LIST_FOR_GAMMA.xlsx"),
//!     "LIST",
//!     EncoderOptions::default(),
//! )
//! .unwrap();
//! write_command_file(Path::new("batch.txt"), &result.output).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod transform;
pub mod validation;

use std::fs::File;
use std::io::Write;
use std::path::Path;

// Re-exports for convenience
pub use config::{EncoderOptions, LineEnding, PrefixPlacement, SheetLayout};
pub use error::{CutListError, ErrorCode, GeometryError, Result};
pub use generator::{FieldDescriptor, FixedWidthEncoder, GAMMA_FIELDS};
pub use model::{CellValue, Grid, PieceRecord, PieceRow, TableSource};
pub use parser::load_worksheet;
pub use pipeline::{Pipeline, PipelineOutput, RowCollection, RowFault};
pub use report::Summary;
pub use transform::{adjusted_length, build_piece};
pub use validation::{validate_collection, ValidationResult};

/// Convert a cutting-list workbook to GAMMA lines.
///
/// Loads the worksheet, then runs the [`Pipeline`] with the default sheet
/// layout. Faulty rows are reported in [`PipelineOutput::faults`].
///
/// # Arguments
///
/// * `input_path` - Path to the `.xlsx` cutting list
/// * `sheet` - Worksheet name
/// * `options` - Encoder settings
pub fn convert_cutting_list(
    input_path: &Path,
    sheet: &str,
    options: EncoderOptions,
) -> Result<PipelineOutput> {
    let grid = load_worksheet(input_path, sheet)?;
    let pipeline = Pipeline::new(SheetLayout::default(), FixedWidthEncoder::new(options));
    pipeline.run(&grid)
}

/// Write the command file, replacing any existing file.
pub fn write_command_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_command_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.txt");

        write_command_file(&path, "first\n").unwrap();
        write_command_file(&path, "second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn test_write_command_file_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("batch.txt");
        let err = write_command_file(&path, "x").unwrap_err();
        assert_eq!(err.code(), ErrorCode::Io);
    }

    #[test]
    fn test_convert_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(config::INPUT_FILE_NAME);
        let err = convert_cutting_list(&path, config::SHEET_NAME, EncoderOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingInput);
    }
}
