//! Tricolor - Alignment and filtering of three-exposure color plates
//!
//! # Overview
//!
//! Early color photographs were taken as three grayscale exposures through
//! blue, green and red filters, stored one above the other on a single
//! plate. This library reconstructs the color image:
//!
//! - Image I/O (PNG, binary PGM/PPM)
//! - Channel alignment by exhaustive mean-squared-error search
//! - Median filtering and 3x3 convolution
//! - Gray-world white balance and autocontrast
//!
//! # Example
//!
//! ```
//! use tricolor::{PixelGrid, Rgb};
//! use tricolor::align::{AlignOptions, Postprocess};
//!
//! let plate = PixelGrid::from_fn(60, 20, |r, c| Rgb::gray(((r % 20) * 9 + c * 5) as u8)).unwrap();
//! let options = AlignOptions::new().with_postprocess(Postprocess::GrayWorld);
//! let out = tricolor::align::align(&plate, &options).unwrap();
//! assert_eq!(out.image.dims(), (20, 20));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use tricolor_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use tricolor_align as align;
pub use tricolor_filter as filter;
pub use tricolor_io as io;
