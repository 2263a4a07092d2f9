//! Cutting-list table parsing.

mod extract;
mod workbook;

pub use extract::{ColumnGroup, TableExtractor};
pub use workbook::{cell_value, load_worksheet};
