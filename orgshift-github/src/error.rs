//! Error types for GitHub operations

use orgshift_core::DirectoryError;
use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// GitHub API error
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// Raw HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Repository, user or organization not found
    #[error("{0} not found")]
    NotFound(String),

    /// Token lacks the rights for this call
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Classify an octocrab failure for `what` (e.g. `owner/repo`)
    pub(crate) fn from_octocrab(err: octocrab::Error, what: &str) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let message = source.message.to_lowercase();
                if message.contains("not found") {
                    Error::NotFound(what.to_string())
                } else if message.contains("bad credentials") {
                    Error::Auth("Invalid GitHub token".to_string())
                } else if message.contains("forbidden")
                    || message.contains("not accessible")
                    || message.contains("must have admin")
                    || message.contains("permission")
                {
                    Error::Forbidden(format!("{}: {}", what, source.message))
                } else {
                    Error::Other(format!("{}: {}", what, source.message))
                }
            }
            other => Error::Api(other),
        }
    }
}

impl From<Error> for DirectoryError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(what) => DirectoryError::NotFound(what),
            Error::Auth(msg) | Error::Forbidden(msg) => DirectoryError::Access(msg),
            other => DirectoryError::Other(other.to_string()),
        }
    }
}
