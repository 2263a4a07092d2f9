//! Data model for cutting lists and machine records.

mod grid;
mod piece;

pub use grid::{CellValue, Grid, TableSource};
pub use piece::{CorrectedSide, PieceRecord, PieceRow};
