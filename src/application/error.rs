//! Application-level errors (wraps domain errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors orchestrate domain failures with I/O boundary issues.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid member data in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no member with id: {0}")]
    MemberNotFound(String),
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
