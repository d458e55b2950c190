//! RepositoryDirectory trait - the collaborator the transfer workflow drives
//!
//! Implemented by the GitHub client in `orgshift-github` and by in-memory
//! fakes in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by a [`RepositoryDirectory`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The caller is not allowed to read or modify the target
    #[error("access denied: {0}")]
    Access(String),

    /// The namespace or repository does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Anything else (network, decoding, server errors)
    #[error("{0}")]
    Other(String),
}

impl DirectoryError {
    /// Whether this is the expected-absence case
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound(_))
    }
}

/// Result type for directory operations
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

/// Snapshot of a repository as reported by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Owning namespace (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Whether this repository is a fork
    pub is_fork: bool,
    /// Whether this repository is private
    pub is_private: bool,
    /// Size in kilobytes
    pub size_kb: u64,
}

impl Repository {
    /// Create a public, non-fork repository snapshot
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            is_fork: false,
            is_private: false,
            size_kb: 0,
        }
    }

    /// Mark as fork
    pub fn with_fork(mut self, is_fork: bool) -> Self {
        self.is_fork = is_fork;
        self
    }

    /// Mark as private
    pub fn with_private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Set the size in kilobytes
    pub fn with_size_kb(mut self, size_kb: u64) -> Self {
        self.size_kb = size_kb;
        self
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Whether the platform took the transfer request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    Accepted,
    Rejected,
}

/// Response to a transfer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    /// Accepted or not
    pub status: SubmitStatus,
    /// Platform status code, when there is one
    pub code: Option<u16>,
    /// Raw response text
    pub details: String,
}

impl SubmitResponse {
    pub fn accepted(details: impl Into<String>) -> Self {
        Self {
            status: SubmitStatus::Accepted,
            code: Some(202),
            details: details.into(),
        }
    }

    pub fn rejected(code: Option<u16>, details: impl Into<String>) -> Self {
        Self {
            status: SubmitStatus::Rejected,
            code,
            details: details.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == SubmitStatus::Accepted
    }
}

/// Read and transfer access to repositories grouped by namespace
#[async_trait]
pub trait RepositoryDirectory: Send + Sync {
    /// List every repository owned by `namespace`
    async fn list_repositories(&self, namespace: &str) -> DirectoryResult<Vec<Repository>>;

    /// Succeeds when `namespace` exists and the caller can see it
    async fn resolve_namespace(&self, namespace: &str) -> DirectoryResult<()>;

    /// Fetch a single repository, `NotFound` if absent
    async fn get_repository(&self, namespace: &str, name: &str) -> DirectoryResult<Repository>;

    /// The caller's permission level on a repository ("admin", "write", ...)
    async fn get_caller_permission(&self, namespace: &str, name: &str) -> DirectoryResult<String>;

    /// Ask the platform to move `full_name` under `destination`
    async fn submit_transfer(
        &self,
        full_name: &str,
        destination: &str,
    ) -> DirectoryResult<SubmitResponse>;

    /// Check if a repository exists
    async fn repository_exists(&self, namespace: &str, name: &str) -> DirectoryResult<bool> {
        match self.get_repository(namespace, name).await {
            Ok(_) => Ok(true),
            Err(DirectoryError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let repo = Repository::new("acme", "widgets");
        assert_eq!(repo.full_name(), "acme/widgets");
    }

    #[test]
    fn test_builder_flags() {
        let repo = Repository::new("acme", "widgets")
            .with_fork(true)
            .with_private(true)
            .with_size_kb(42);
        assert!(repo.is_fork);
        assert!(repo.is_private);
        assert_eq!(repo.size_kb, 42);
    }

    #[test]
    fn test_submit_response() {
        assert!(SubmitResponse::accepted("").is_accepted());
        let rejected = SubmitResponse::rejected(Some(422), "nope");
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.code, Some(422));
    }

    #[test]
    fn test_not_found_helper() {
        assert!(DirectoryError::NotFound("x".into()).is_not_found());
        assert!(!DirectoryError::Access("x".into()).is_not_found());
    }
}
