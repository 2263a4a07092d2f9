//! Conversion pipeline: table rows to machine lines.
//!
//! Column groups are processed in order and, within a group, rows top to
//! bottom. A faulty row is logged and skipped; it never stops the run.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, error, info};

use crate::config::SheetLayout;
use crate::error::{CutListError, ErrorCode, Result};
use crate::generator::FixedWidthEncoder;
use crate::model::{PieceRecord, PieceRow, TableSource};
use crate::parser::{ColumnGroup, TableExtractor};
use crate::transform::build_piece;

/// A row that produced no line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFault {
    /// 0-based column group index.
    pub column_group: usize,
    pub row: u32,
    pub code: ErrorCode,
    pub message: String,
}

impl RowFault {
    /// Record a row-level error against its position.
    pub fn new(column_group: usize, row: u32, err: &CutListError) -> Self {
        Self {
            column_group,
            row,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Insertion-ordered set of descriptions.
#[derive(Debug, Clone, Default)]
pub struct DescriptionList {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl DescriptionList {
    /// Add a description unless already present. Returns whether it was new.
    pub fn insert(&mut self, description: &str) -> bool {
        if self.seen.contains(description) {
            return false;
        }
        self.seen.insert(description.to_string());
        self.items.push(description.to_string());
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineOutput {
    /// Concatenated machine lines.
    pub output: String,
    /// Number of lines in `output`.
    pub line_count: usize,
    /// Profile code of each column group.
    pub profile_codes: Vec<String>,
    /// Distinct descriptions of the first column group, first seen first.
    pub descriptions: Vec<String>,
    /// Rows skipped because of a fault.
    pub faults: Vec<RowFault>,
}

/// Extracted rows without building or encoding.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RowCollection {
    pub rows: Vec<PieceRow>,
    pub faults: Vec<RowFault>,
}

/// Cutting-list to GAMMA conversion.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    layout: SheetLayout,
    encoder: FixedWidthEncoder,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(layout: SheetLayout, encoder: FixedWidthEncoder) -> Self {
        Self { layout, encoder }
    }

    /// Get the encoder.
    pub fn encoder(&self) -> &FixedWidthEncoder {
        &self.encoder
    }

    /// Convert every included (column group, row) pair of the table.
    ///
    /// Fails only when the table has no rows to visit.
    pub fn run(&self, source: &dyn TableSource) -> Result<PipelineOutput> {
        let extractor = TableExtractor::new(source, self.layout);
        let rows = extractor.data_rows()?;
        let order = extractor.order();
        let groups = extractor.column_groups();

        debug!(
            "Visiting rows {}..={} across {} column group(s)",
            rows.start(),
            rows.end(),
            groups.len()
        );

        let mut output = PipelineOutput::default();
        let mut descriptions = DescriptionList::default();

        for group in &groups {
            for row in rows.clone() {
                if !extractor.is_included(group, row) {
                    continue;
                }

                let result = extractor.extract_row(group, row, &order);

                if group.index == 0 {
                    match &result {
                        Ok(piece) => descriptions.insert(&piece.description),
                        Err(_) => descriptions.insert(&extractor.description(row)),
                    };
                }

                match result.and_then(|piece| build_record(&piece)) {
                    Ok(record) => {
                        self.encoder.encode_into(&record, &mut output.output);
                        output.line_count += 1;
                        debug!(
                            "Group {} row {}: {} x {} ext={} int={}",
                            group.index + 1,
                            row,
                            record.quantity,
                            record.code,
                            record.ext_length,
                            record.int_length
                        );
                    }
                    Err(err) if err.is_row_fault() => {
                        output.faults.push(report_fault(group, row, &err))
                    }
                    Err(err) => return Err(err),
                }
            }

            output
                .profile_codes
                .push(extractor.profile_code(group).unwrap_or_default());
        }

        output.descriptions = descriptions.into_vec();

        info!(
            "Encoded {} line(s) from {} column group(s), {} row(s) skipped",
            output.line_count,
            groups.len(),
            output.faults.len()
        );

        Ok(output)
    }

    /// Extract the typed rows of the table in pipeline order.
    pub fn collect_rows(&self, source: &dyn TableSource) -> Result<RowCollection> {
        let extractor = TableExtractor::new(source, self.layout);
        let rows = extractor.data_rows()?;
        let order = extractor.order();

        let mut collection = RowCollection::default();
        for group in &extractor.column_groups() {
            for row in rows.clone() {
                if !extractor.is_included(group, row) {
                    continue;
                }
                match extractor.extract_row(group, row, &order) {
                    Ok(piece) => collection.rows.push(piece),
                    Err(err) if err.is_row_fault() => {
                        collection.faults.push(report_fault(group, row, &err))
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Ok(collection)
    }
}

/// Build a record, tagging geometry failures with the row position.
pub fn build_record(piece: &PieceRow) -> Result<PieceRecord> {
    build_piece(piece).map_err(|source| CutListError::Geometry {
        column_group: piece.column_group,
        row: piece.row,
        source,
    })
}

fn report_fault(group: &ColumnGroup, row: u32, err: &CutListError) -> RowFault {
    error!(code = err.code_value(), "An error occurred: {}", err);
    RowFault::new(group.index, row, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_list_keeps_first_seen_order() {
        let mut list = DescriptionList::default();
        assert!(list.insert("B"));
        assert!(list.insert("A"));
        assert!(!list.insert("B"));
        assert!(list.insert(""));
        assert_eq!(list.as_slice(), ["B", "A", ""]);
    }
}
