//! Error types for cutting-list conversion.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for cutting-list processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// Input table not found (-1)
    MissingInput = -1,
    /// Workbook or worksheet unreadable (-2)
    Workbook = -2,
    /// No description rows in the table (-3)
    EmptyCutList = -3,
    /// Output could not be written (-4)
    Io = -4,
    /// Degenerate miter angle (E100)
    Geometry = 100,
    /// Row could not be converted (E101)
    RowProcessing = 101,
}

/// Degenerate trigonometric input to the miter calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Cotangent undefined for a tilt of {angle} degrees")]
    DegenerateAngle { angle: i32 },
}

/// Main error type for the converter.
#[derive(Debug, Error)]
pub enum CutListError {
    #[error("Excel file not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("Cannot read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("No description rows found in the cutting list")]
    EmptyCutList,

    #[error("Column group {}, row {}: {}", .column_group + 1, .row, .source)]
    Geometry {
        column_group: usize,
        row: u32,
        #[source]
        source: GeometryError,
    },

    #[error("Column group {}, row {}: {}", .column_group + 1, .row, .message)]
    RowProcessing {
        column_group: usize,
        row: u32,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CutListError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CutListError::MissingInput { .. } => ErrorCode::MissingInput,
            CutListError::Workbook { .. } => ErrorCode::Workbook,
            CutListError::EmptyCutList => ErrorCode::EmptyCutList,
            CutListError::Geometry { .. } => ErrorCode::Geometry,
            CutListError::RowProcessing { .. } => ErrorCode::RowProcessing,
            CutListError::Io(_) => ErrorCode::Io,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether the fault only costs a single row.
    pub fn is_row_fault(&self) -> bool {
        matches!(
            self,
            CutListError::Geometry { .. } | CutListError::RowProcessing { .. }
        )
    }

    pub(crate) fn row(column_group: usize, row: u32, message: impl Into<String>) -> Self {
        CutListError::RowProcessing {
            column_group,
            row,
            message: message.into(),
        }
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, CutListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let missing = CutListError::MissingInput {
            path: PathBuf::from("CUTTING_LIST_FOR_GAMMA.xlsx"),
        };
        assert_eq!(missing.code(), ErrorCode::MissingInput);
        assert_eq!(missing.code_value(), -1);
        assert!(!missing.is_row_fault());

        let geometry = CutListError::Geometry {
            column_group: 0,
            row: 12,
            source: GeometryError::DegenerateAngle { angle: 0 },
        };
        assert_eq!(geometry.code_value(), 100);
        assert!(geometry.is_row_fault());
        assert_eq!(
            geometry.to_string(),
            "Column group 1, row 12: Cotangent undefined for a tilt of 0 degrees"
        );
    }
}
