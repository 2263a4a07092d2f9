//! Row extraction from the cutting-list table.

use serde::Serialize;
use std::ops::RangeInclusive;
use tracing::warn;

use crate::config::SheetLayout;
use crate::error::{CutListError, Result};
use crate::model::{CellValue, PieceRow, TableSource};

/// One profile column group: quantity column followed by length column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnGroup {
    /// 0-based group index.
    pub index: usize,
    pub quantity_column: u32,
    pub length_column: u32,
}

/// Walks a cutting-list table and yields typed rows.
pub struct TableExtractor<'a> {
    source: &'a dyn TableSource,
    layout: SheetLayout,
}

impl<'a> TableExtractor<'a> {
    /// Create an extractor over a table.
    pub fn new(source: &'a dyn TableSource, layout: SheetLayout) -> Self {
        Self { source, layout }
    }

    /// Column groups, sized from the last used column of the data start row.
    pub fn column_groups(&self) -> Vec<ColumnGroup> {
        let last_column = self
            .source
            .last_column_in_row(self.layout.data_start_row)
            .unwrap_or(0);

        (0..self.layout.group_count(last_column))
            .map(|index| ColumnGroup {
                index,
                quantity_column: self.layout.quantity_column(index),
                length_column: self.layout.length_column(index),
            })
            .collect()
    }

    /// Rows to visit: from the data start row to one past the last description.
    pub fn data_rows(&self) -> Result<RangeInclusive<u32>> {
        let last = self
            .source
            .last_row_in_column(self.layout.description_column)
            .ok_or(CutListError::EmptyCutList)?;

        if last + 1 < self.layout.data_start_row {
            return Err(CutListError::EmptyCutList);
        }

        Ok(self.layout.data_start_row..=last + 1)
    }

    /// Order identifier shared by every piece, empty when the cell is blank.
    pub fn order(&self) -> String {
        let (row, column) = self.layout.order_cell;
        self.source
            .cell(row, column)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    /// Profile code header of a column group.
    pub fn profile_code(&self, group: &ColumnGroup) -> Option<String> {
        self.source
            .cell(self.layout.code_row, group.quantity_column)
            .map(|v| v.to_string())
    }

    /// Whether a row carries a piece for the group (quantity cell non-empty).
    pub fn is_included(&self, group: &ColumnGroup, row: u32) -> bool {
        self.source.cell(row, group.quantity_column).is_some()
    }

    /// Description of a row, taken from the row above when blank.
    pub fn description(&self, row: u32) -> String {
        let column = self.layout.description_column;
        if let Some(value) = self.source.cell(row, column) {
            return value.to_string();
        }

        match self.source.cell(row.saturating_sub(1), column) {
            Some(value) => value.to_string(),
            None => {
                warn!(
                    "Row {}: no description in this row or the row above",
                    row
                );
                String::new()
            }
        }
    }

    /// Coerce the cells of one (group, row) pair into a [`PieceRow`].
    pub fn extract_row(&self, group: &ColumnGroup, row: u32, order: &str) -> Result<PieceRow> {
        let cells = RowCells {
            source: self.source,
            group: group.index,
            row,
        };
        let layout = &self.layout;

        let code = cells
            .required(layout.code_row, group.quantity_column, "profile code")?
            .to_string();
        // Nominal length and height are whole units; the fraction is dropped
        let length = cells.integer(row, group.length_column, "length")? as f64;
        let height = cells.integer(layout.height_row, group.quantity_column, "height")? as f64;
        let quantity = cells.integer(row, group.quantity_column, "quantity")?;
        let left_tilt = cells.integer(layout.tilt_row, group.quantity_column, "left tilt")?;
        let right_tilt = cells.integer(layout.tilt_row, group.length_column, "right tilt")?;

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|&q| q > 0)
            .ok_or_else(|| {
                CutListError::row(
                    group.index,
                    row,
                    format!("quantity must be positive, got {}", quantity),
                )
            })?;

        Ok(PieceRow {
            column_group: group.index,
            row,
            code,
            length,
            height,
            quantity,
            left_tilt: cells.tilt(left_tilt, "left tilt")?,
            right_tilt: cells.tilt(right_tilt, "right tilt")?,
            order: order.to_string(),
            description: self.description(row),
        })
    }
}

/// Cell access for one row, tagging failures with the row's position.
struct RowCells<'a> {
    source: &'a dyn TableSource,
    group: usize,
    row: u32,
}

impl RowCells<'_> {
    fn required(&self, row: u32, column: u32, name: &str) -> Result<&CellValue> {
        self.source.cell(row, column).ok_or_else(|| {
            CutListError::row(
                self.group,
                self.row,
                format!("{} cell ({}, {}) is empty", name, row, column),
            )
        })
    }

    fn integer(&self, row: u32, column: u32, name: &str) -> Result<i64> {
        let value = self.required(row, column, name)?;
        value.as_integer().ok_or_else(|| {
            CutListError::row(
                self.group,
                self.row,
                format!("{}: expected an integer, got '{}'", name, value),
            )
        })
    }

    fn tilt(&self, degrees: i64, name: &str) -> Result<i32> {
        i32::try_from(degrees).map_err(|_| {
            CutListError::row(
                self.group,
                self.row,
                format!("{} of {} degrees is out of range", name, degrees),
            )
        })
    }
}
