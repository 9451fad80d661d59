//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::application::format::InputFormat;
use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("cannot parse {format} input: {message}")]
    Parse {
        format: InputFormat,
        message: String,
    },

    #[error("cannot determine input format: {0}")]
    UnknownFormat(String),

    #[error("invalid tag mapping: {message}")]
    InvalidMapping { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
