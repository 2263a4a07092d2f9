//! Machine file generator module.

mod fixed_width;
pub(crate) mod format;

pub use fixed_width::{
    format_length, pad_field, Field, FieldDescriptor, FieldOverflow, FixedWidthEncoder,
    GAMMA_FIELDS,
};
pub use format::{format_general, round_to};
