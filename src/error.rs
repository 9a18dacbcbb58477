//! Error types shared across the reporting pipeline

use thiserror::Error;

/// Errors produced by selection, aggregation, and store access
#[derive(Error, Debug)]
pub enum Error {
    /// A statistic that requires data was computed over an empty sequence.
    /// Callers aggregating many builders skip the row; single-target callers
    /// surface a visible "no data" message instead.
    #[error("statistic requires a non-empty data set")]
    EmptyInput,

    #[error("unsupported statistic: {0}")]
    UnsupportedStatistic(String),

    /// Neither a category nor a builder pattern was supplied to a selection.
    #[error("a category or builder pattern is required")]
    SelectionRequired,

    #[error("invalid builder pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The snapshot referenced an entity that does not exist.
    #[error("malformed snapshot: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for farmstat operations
pub type Result<T> = std::result::Result<T, Error>;
