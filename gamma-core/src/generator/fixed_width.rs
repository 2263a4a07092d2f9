//! Fixed-width line encoder for the GAMMA angle-cutting machine.
//!
//! Every record becomes one line: the fields of [`GAMMA_FIELDS`] in order,
//! each left-justified and space-padded (or cut from the right) to its width,
//! followed by the `EXT` terminator. There are no delimiters, no header and
//! no checksum.

use serde::Serialize;
use std::fmt;

use crate::config::{
    EncoderOptions, PrefixPlacement, LENGTH_SIGNIFICANT_DIGITS, LINE_TERMINATOR,
};
use crate::model::PieceRecord;

use super::format::format_general;

/// A machine record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Barcode,
    Code,
    ExtLength,
    IntLength,
    Height,
    Quantity,
    LeftTilt,
    RightTilt,
    PieceNumber,
    Lot,
    Trolley,
    Order,
    Frame,
    Shutter,
    Description,
}

impl Field {
    /// Field name as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Barcode => "barcode",
            Field::Code => "code",
            Field::ExtLength => "extLength",
            Field::IntLength => "intLength",
            Field::Height => "height",
            Field::Quantity => "quantity",
            Field::LeftTilt => "leftTilt",
            Field::RightTilt => "rightTilt",
            Field::PieceNumber => "pieceNumber",
            Field::Lot => "lot",
            Field::Trolley => "trolley",
            Field::Order => "order",
            Field::Frame => "frame",
            Field::Shutter => "shutter",
            Field::Description => "description",
        }
    }

    /// Unpadded text of this field for a record.
    pub fn value(&self, record: &PieceRecord) -> String {
        match self {
            Field::Barcode => record.barcode.clone(),
            Field::Code => record.code.clone(),
            Field::ExtLength => format_length(record.ext_length),
            Field::IntLength => format_length(record.int_length),
            Field::Height => format_length(record.height),
            Field::Quantity => record.quantity.to_string(),
            Field::LeftTilt => record.left_tilt.to_string(),
            Field::RightTilt => record.right_tilt.to_string(),
            Field::PieceNumber => record.piece_number.clone(),
            Field::Lot => record.lot.clone(),
            Field::Trolley => record.trolley.clone(),
            Field::Order => record.order.clone(),
            Field::Frame => record.frame.clone(),
            Field::Shutter => record.shutter.clone(),
            Field::Description => record.description.clone(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a field within a machine line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: Field,
    /// Width in characters.
    pub width: usize,
    /// Literal written ahead of the value.
    pub prefix: Option<&'static str>,
}

impl FieldDescriptor {
    pub const fn new(field: Field, width: usize) -> Self {
        Self {
            field,
            width,
            prefix: None,
        }
    }

    pub const fn prefixed(field: Field, width: usize, prefix: &'static str) -> Self {
        Self {
            field,
            width,
            prefix: Some(prefix),
        }
    }
}

/// Field layout of a GAMMA line.
pub const GAMMA_FIELDS: [FieldDescriptor; 15] = [
    FieldDescriptor::new(Field::Barcode, 13),
    FieldDescriptor::prefixed(Field::Code, 15, "C"),
    FieldDescriptor::new(Field::ExtLength, 7),
    FieldDescriptor::new(Field::IntLength, 7),
    FieldDescriptor::new(Field::Height, 5),
    FieldDescriptor::new(Field::Quantity, 3),
    FieldDescriptor::new(Field::LeftTilt, 5),
    FieldDescriptor::new(Field::RightTilt, 5),
    FieldDescriptor::new(Field::PieceNumber, 5),
    FieldDescriptor::prefixed(Field::Lot, 9, "Lot"),
    FieldDescriptor::prefixed(Field::Trolley, 2, "Casier"),
    FieldDescriptor::prefixed(Field::Order, 10, "Cde"),
    FieldDescriptor::prefixed(Field::Frame, 3, "Ch."),
    FieldDescriptor::prefixed(Field::Shutter, 5, "Ouv"),
    FieldDescriptor::new(Field::Description, 100),
];

/// A field whose text does not fit its width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOverflow {
    pub field: Field,
    pub width: usize,
    /// Text before truncation, prefix included when it counts toward the width.
    pub text: String,
}

/// Encoder turning [`PieceRecord`]s into machine lines.
#[derive(Debug, Clone)]
pub struct FixedWidthEncoder {
    fields: Vec<FieldDescriptor>,
    options: EncoderOptions,
}

impl Default for FixedWidthEncoder {
    fn default() -> Self {
        Self::new(EncoderOptions::default())
    }
}

impl FixedWidthEncoder {
    /// Create an encoder for the GAMMA field layout.
    pub fn new(options: EncoderOptions) -> Self {
        Self {
            fields: GAMMA_FIELDS.to_vec(),
            options,
        }
    }

    /// Character count of a line before the terminator.
    pub fn record_width(&self) -> usize {
        self.fields
            .iter()
            .map(|d| match (self.options.prefix_placement, d.prefix) {
                (PrefixPlacement::BeforeField, Some(prefix)) => {
                    prefix.chars().count() + d.width
                }
                _ => d.width,
            })
            .sum()
    }

    /// Encode a record as one terminated line.
    pub fn encode(&self, record: &PieceRecord) -> String {
        let mut line = String::with_capacity(self.record_width() + 5);
        self.encode_into(record, &mut line);
        line
    }

    /// Append the encoded line for a record to `output`.
    pub fn encode_into(&self, record: &PieceRecord, output: &mut String) {
        for descriptor in &self.fields {
            output.push_str(&self.render_field(descriptor, record));
        }
        output.push_str(LINE_TERMINATOR);
        output.push_str(self.options.line_ending.as_str());
    }

    /// Padded text of one field, prefix included.
    pub fn render_field(&self, descriptor: &FieldDescriptor, record: &PieceRecord) -> String {
        let value = sanitize(&descriptor.field.value(record));
        match (descriptor.prefix, self.options.prefix_placement) {
            (None, _) => pad_field(&value, descriptor.width),
            (Some(prefix), PrefixPlacement::WithinWidth) => {
                pad_field(&format!("{}{}", prefix, value), descriptor.width)
            }
            (Some(prefix), PrefixPlacement::BeforeField) => {
                format!("{}{}", prefix, pad_field(&value, descriptor.width))
            }
        }
    }

    /// Non-empty fields of a record that would be cut to fit their width.
    pub fn overflows(&self, record: &PieceRecord) -> Vec<FieldOverflow> {
        self.fields
            .iter()
            .filter_map(|descriptor| {
                let value = sanitize(&descriptor.field.value(record));
                if value.is_empty() {
                    return None;
                }
                let text = match (descriptor.prefix, self.options.prefix_placement) {
                    (Some(prefix), PrefixPlacement::WithinWidth) => format!("{}{}", prefix, value),
                    _ => value,
                };
                (text.chars().count() > descriptor.width).then(|| FieldOverflow {
                    field: descriptor.field,
                    width: descriptor.width,
                    text,
                })
            })
            .collect()
    }
}

/// Left-justify `value` in `width` characters, cutting from the right when longer.
pub fn pad_field(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        value.chars().take(width).collect()
    } else {
        let mut padded = String::with_capacity(value.len() + width - len);
        padded.push_str(value);
        padded.extend(std::iter::repeat(' ').take(width - len));
        padded
    }
}

/// Render a length with up to 10 significant digits and no trailing zeros.
pub fn format_length(value: f64) -> String {
    format_general(value, LENGTH_SIGNIFICANT_DIGITS)
}

/// Control characters would split or shift a line; each becomes a space.
fn sanitize(value: &str) -> String {
    if value.chars().any(char::is_control) {
        value
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LineEnding;

    fn sample_record() -> PieceRecord {
        let mut record = PieceRecord::new("AB1", 1000.0, 50.0);
        record.int_length = 900.0;
        record.quantity = 2;
        record.set_tilts(45, 45);
        record.order = "4711".to_string();
        record.description = "Kitchen window".to_string();
        record
    }

    #[test]
    fn test_pad_field() {
        assert_eq!(pad_field("AB", 5), "AB   ");
        assert_eq!(pad_field("ABCDEFG", 5), "ABCDE");
        assert_eq!(pad_field("ABCDE", 5), "ABCDE");
        assert_eq!(pad_field("", 3), "   ");
        assert_eq!(pad_field("Größe", 3), "Grö");
    }

    #[test]
    fn test_prefixed_code_within_width() {
        let encoder = FixedWidthEncoder::default();
        let code = FieldDescriptor::prefixed(Field::Code, 15, "C");
        let cell = encoder.render_field(&code, &sample_record());
        assert_eq!(cell, "CAB1           ");
        assert_eq!(cell.len(), 15);
    }

    #[test]
    fn test_prefix_longer_than_width_is_cut() {
        let encoder = FixedWidthEncoder::default();
        let trolley = FieldDescriptor::prefixed(Field::Trolley, 2, "Casier");
        assert_eq!(encoder.render_field(&trolley, &sample_record()), "Ca");
    }

    #[test]
    fn test_prefix_before_field() {
        let encoder = FixedWidthEncoder::new(EncoderOptions {
            prefix_placement: PrefixPlacement::BeforeField,
            ..Default::default()
        });
        let code = FieldDescriptor::prefixed(Field::Code, 15, "C");
        assert_eq!(
            encoder.render_field(&code, &sample_record()),
            "CAB1            "
        );
        let trolley = FieldDescriptor::prefixed(Field::Trolley, 2, "Casier");
        assert_eq!(encoder.render_field(&trolley, &sample_record()), "Casier  ");
    }

    #[test]
    fn test_encode_line_layout() {
        let encoder = FixedWidthEncoder::default();
        let line = encoder.encode(&sample_record());

        assert!(line.ends_with("EXT\n"));
        assert_eq!(line.len(), encoder.record_width() + 4);
        assert_eq!(encoder.record_width(), 194);

        let body = &line[..194];
        assert_eq!(&body[0..13], "             ");
        assert_eq!(&body[13..28], "CAB1           ");
        assert_eq!(&body[28..35], "1000   ");
        assert_eq!(&body[35..42], "900    ");
        assert_eq!(&body[42..47], "50   ");
        assert_eq!(&body[47..50], "2  ");
        assert_eq!(&body[50..55], "45   ");
        assert_eq!(&body[55..60], "45   ");
        assert_eq!(&body[60..65], "     ");
        assert_eq!(&body[65..74], "Lot      ");
        assert_eq!(&body[74..76], "Ca");
        assert_eq!(&body[76..86], "Cde4711   ");
        assert_eq!(&body[86..89], "Ch.");
        assert_eq!(&body[89..94], "Ouv  ");
        assert_eq!(body[94..].trim_end(), "Kitchen window");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = FixedWidthEncoder::default();
        let record = sample_record();
        assert_eq!(encoder.encode(&record), encoder.encode(&record));
    }

    #[test]
    fn test_crlf_line_ending() {
        let encoder = FixedWidthEncoder::new(EncoderOptions {
            line_ending: LineEnding::CrLf,
            ..Default::default()
        });
        assert!(encoder.encode(&sample_record()).ends_with("EXT\r\n"));
    }

    #[test]
    fn test_control_characters_stay_on_one_line() {
        let encoder = FixedWidthEncoder::default();
        let mut record = sample_record();
        record.description = "Line one\nEXT\nline two".to_string();
        let line = encoder.encode(&record);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.contains("Line one EXT line two"));
    }

    #[test]
    fn test_length_rendering() {
        assert_eq!(format_length(900.0), "900");
        assert_eq!(format_length(1361.4), "1361.4");
        assert_eq!(format_length(812.25), "812.25");
    }

    #[test]
    fn test_overflows() {
        let encoder = FixedWidthEncoder::default();
        let mut record = sample_record();
        // Empty reserved fields only lose their prefix
        assert!(encoder.overflows(&record).is_empty());

        record.code = "PROFILE-CODE-LONG".to_string();
        let overflows = encoder.overflows(&record);
        let code = overflows.iter().find(|o| o.field == Field::Code).unwrap();
        assert_eq!(code.width, 15);
        assert_eq!(code.text, "CPROFILE-CODE-LONG");
    }
}
