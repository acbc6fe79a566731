//! Error types for ratio calculations that read external input.

use thiserror::Error;

/// Result type for ratio operations.
pub type Result<T> = std::result::Result<T, RatioError>;

/// Errors raised while reading a discount schedule.
#[derive(Debug, Error)]
pub enum RatioError {
    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A cell could not be read as a number
    #[error("Invalid number {value:?} in row {row}, column {column}")]
    Parse {
        /// Row index, 1-based, after the header
        row: usize,
        /// Column index, 0-based
        column: usize,
        /// Raw cell contents
        value: String,
    },

    /// A required row is absent
    #[error("Missing row: {0}")]
    MissingRow(&'static str),
}
