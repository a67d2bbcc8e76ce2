//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input data.
/// These are independent of where the data came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed record: {message}")]
    MalformedRecord { message: String },

    #[error("malformed tree at offset {offset}: {message}")]
    MalformedTree { message: String, offset: usize },

    #[error("tree has no leaves")]
    NoLeaves,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
