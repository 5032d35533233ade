//! tricolor-filter - Spatial filters for pixel grids
//!
//! This crate provides:
//!
//! - Convolution with arbitrary odd square kernels, plus fixed Sobel and
//!   unsharp kernels
//! - Median filtering with three interchangeable strategies
//! - Gray-world white balance and histogram-stretch autocontrast

pub mod convolve;
pub mod enhance;
mod error;
pub mod kernel;
pub mod median;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

pub use enhance::{TrcLut, autocontrast, gray_world, map_channels};
pub use median::snake::{Snake, SnakeMove, SnakeState, SnakeStep};
pub use median::{
    MedianFn, MedianVariant, median_column_cached, median_filter, median_naive, median_row_snake,
};
