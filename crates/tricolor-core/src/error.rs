//! Error types for tricolor-core
//!
//! Provides a unified error type for all fallible grid operations.
//! Out-of-range element access through [`PixelGrid::at`](crate::PixelGrid::at)
//! is a programming error and panics instead of returning one of these.

use thiserror::Error;

/// tricolor-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {rows}x{cols}")]
    InvalidDimension { rows: u32, cols: u32 },

    /// Element index out of bounds
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    IndexOutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },

    /// Rectangle does not fit inside the grid
    #[error(
        "region at ({row}, {col}) of size {height}x{width} exceeds {rows}x{cols} grid"
    )]
    RegionOutOfBounds {
        row: u32,
        col: u32,
        height: u32,
        width: u32,
        rows: u32,
        cols: u32,
    },

    /// Grid dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for tricolor-core operations
pub type Result<T> = std::result::Result<T, Error>;
