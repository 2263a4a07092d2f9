//! Tabular cell access for the cutting list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A non-empty cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Integer value, truncating numbers toward zero.
    ///
    /// Text must hold a plain integer (surrounding whitespace allowed).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            CellValue::Number(_) => None,
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Bool(b) => Some(i64::from(*b)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

/// Read access to a grid of cells addressed by 1-based (row, column).
pub trait TableSource {
    /// Value of a cell, `None` when the cell is empty or out of range.
    fn cell(&self, row: u32, column: u32) -> Option<&CellValue>;

    /// Highest row index holding any cell.
    fn max_row(&self) -> u32;

    /// Highest column index holding any cell.
    fn max_column(&self) -> u32;

    /// Last row with a value in `column`.
    fn last_row_in_column(&self, column: u32) -> Option<u32> {
        (1..=self.max_row())
            .rev()
            .find(|&row| self.cell(row, column).is_some())
    }

    /// Last column with a value in `row`.
    fn last_column_in_row(&self, row: u32) -> Option<u32> {
        (1..=self.max_column())
            .rev()
            .find(|&column| self.cell(row, column).is_some())
    }
}

/// Sparse in-memory grid.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: HashMap<(u32, u32), CellValue>,
    max_row: u32,
    max_column: u32,
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell. Row and column are 1-based; index 0 is ignored.
    pub fn set(&mut self, row: u32, column: u32, value: impl Into<CellValue>) {
        if row == 0 || column == 0 {
            return;
        }
        self.cells.insert((row, column), value.into());
        self.max_row = self.max_row.max(row);
        self.max_column = self.max_column.max(column);
    }

    /// Builder-style [`Grid::set`].
    pub fn with(mut self, row: u32, column: u32, value: impl Into<CellValue>) -> Self {
        self.set(row, column, value);
        self
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl TableSource for Grid {
    fn cell(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cells.get(&(row, column))
    }

    fn max_row(&self) -> u32 {
        self.max_row
    }

    fn max_column(&self) -> u32 {
        self.max_column
    }
}
