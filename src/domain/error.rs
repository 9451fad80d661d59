//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent conversion failures.
/// Conversion is all-or-nothing: on error no partial markup is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid heading tag {tag:?} for key {key:?}: last character must be a digit")]
    InvalidTagFormat { key: String, tag: String },

    #[error("maximum nesting depth exceeded (limit: {limit})")]
    MaxDepthExceeded { limit: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
