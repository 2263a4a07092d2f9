//! Transformations from cutting-list rows to machine records.

mod builder;
mod miter;

pub use builder::build_piece;
pub use miter::adjusted_length;
