//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exitcode::USAGE,
            CliError::Infra(InfraError::Io { source, .. }) => io_exit_code(source),
            CliError::Infra(InfraError::Application(e)) => match e {
                ApplicationError::Domain(_)
                | ApplicationError::Parse { .. }
                | ApplicationError::InvalidMapping { .. } => exitcode::DATAERR,
                ApplicationError::UnknownFormat(_) => exitcode::USAGE,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { source, .. } => source
                    .downcast_ref::<std::io::Error>()
                    .map(io_exit_code)
                    .unwrap_or(exitcode::SOFTWARE),
            },
        }
    }
}

fn io_exit_code(e: &std::io::Error) -> i32 {
    match e.kind() {
        std::io::ErrorKind::NotFound => exitcode::NOINPUT,
        _ => exitcode::IOERR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_domain_error_when_exit_code_then_dataerr() {
        let err = CliError::from(ApplicationError::Domain(DomainError::MaxDepthExceeded {
            limit: 3,
        }));
        assert_eq!(err.exit_code(), exitcode::DATAERR);
    }

    #[test]
    fn given_missing_file_when_exit_code_then_noinput() {
        let err = CliError::from(ApplicationError::OperationFailed {
            context: "read input: x.json".into(),
            source: Box::new(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")),
        });
        assert_eq!(err.exit_code(), exitcode::NOINPUT);
    }

    #[test]
    fn given_config_error_when_exit_code_then_config() {
        let err = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        assert_eq!(err.exit_code(), exitcode::CONFIG);
    }

    #[test]
    fn given_invalid_args_when_exit_code_then_usage() {
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), exitcode::USAGE);
    }
}
