//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Usage(String),

    #[error("cannot write {0}: {1}")]
    Write(std::path::PathBuf, #[source] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Write(..) => crate::exitcode::IOERR,
            CliError::Application(e) => match e {
                ApplicationError::Io { .. } => crate::exitcode::IOERR,
                ApplicationError::Parse { .. } => crate::exitcode::DATAERR,
                ApplicationError::MemberNotFound(_) => crate::exitcode::DATAERR,
                ApplicationError::Domain(d) => match d {
                    DomainError::DuplicateEdge { .. }
                    | DomainError::UnknownId { .. }
                    | DomainError::DuplicateMember(_)
                    | DomainError::CycleDetected(_) => crate::exitcode::DATAERR,
                },
            },
        }
    }
}
