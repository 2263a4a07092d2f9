//! Cutting-list workbook reader.

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;
use tracing::debug;

use crate::error::{CutListError, Result};
use crate::model::{CellValue, Grid};

/// Load one worksheet of an `.xlsx` workbook into a [`Grid`].
///
/// Formula cells yield their cached values.
pub fn load_worksheet(path: &Path, sheet: &str) -> Result<Grid> {
    if !path.exists() {
        return Err(CutListError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| CutListError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| CutListError::Workbook {
            path: path.to_path_buf(),
            message: format!("worksheet '{}': {}", sheet, e),
        })?;

    let (start_row, start_column) = range.start().unwrap_or((0, 0));
    let mut grid = Grid::new();

    for (row, column, data) in range.used_cells() {
        if let Some(value) = cell_value(data) {
            // calamine positions are 0-based and relative to the range start
            grid.set(
                start_row + row as u32 + 1,
                start_column + column as u32 + 1,
                value,
            );
        }
    }

    debug!(
        "Loaded worksheet '{}' from {}: {} cells",
        sheet,
        path.display(),
        grid.len()
    );

    Ok(grid)
}

/// Convert a calamine cell to a [`CellValue`], `None` for empty cells.
pub fn cell_value(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
    }
}
