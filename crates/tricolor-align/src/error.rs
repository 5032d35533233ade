//! Error types for tricolor-align

use thiserror::Error;

/// Errors that can occur while aligning a plate
#[derive(Debug, Error)]
pub enum AlignError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] tricolor_core::Error),

    /// Error from a postprocessing filter
    #[error("filter error: {0}")]
    Filter(#[from] tricolor_filter::FilterError),

    /// The plate cannot be split and searched with the requested margins
    #[error("invalid plate: {0}")]
    InvalidPlate(String),

    /// Invalid option or argument
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;
