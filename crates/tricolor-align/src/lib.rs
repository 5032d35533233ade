//! tricolor-align - Channel alignment of three-exposure plates
//!
//! A plate stacks three grayscale exposures of the same scene vertically:
//! blue on top, green in the middle, red at the bottom. This crate splits
//! the plate, finds the integer translation of red and blue that best
//! matches green, and composites the overlapping region into one color
//! image, optionally followed by a postprocessing filter.

mod align;
mod error;
mod options;

pub use align::{
    AlignOutput, Offset, OffsetScore, Planes, align, align_image, composite, find_offset,
    overlap_mse, postprocess, split_plate,
};
pub use error::{AlignError, AlignResult};
pub use options::{AlignOptions, Postprocess};
