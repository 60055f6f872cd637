//! Error types for the core domain

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while parsing identifiers and dates coming from outside the process
#[derive(Error, Debug)]
pub enum CoreError {
    /// A book identifier that is not a valid UUID
    #[error("Invalid book id '{value}': {source}")]
    InvalidBookId {
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// A calendar date that is not in `YYYY-MM-DD` form
    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
