//! Error types for Orgshift

use thiserror::Error;

use crate::directory::DirectoryError;

/// Result type alias for Orgshift operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Orgshift operations
///
/// Only failures that abort a whole run end up here. Anything local to a
/// single repository is recorded on its [`crate::TransferOutcome`] instead.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The source namespace could not be enumerated
    #[error("Failed to list repositories in '{namespace}': {source}")]
    Listing {
        namespace: String,
        #[source]
        source: DirectoryError,
    },

    /// No GitHub token was supplied
    #[error("GitHub token not found. Pass --token, set GITHUB_TOKEN, or add it to the secrets file")]
    MissingToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_listing_error_keeps_source() {
        let err = Error::Listing {
            namespace: "acme".to_string(),
            source: DirectoryError::Access("Bad credentials".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "Failed to list repositories in 'acme': access denied: Bad credentials"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_converts() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
