//! Orgshift GitHub - GitHub integration for orgshift
//!
//! This crate provides GitHub API access for listing namespace repositories,
//! checking permissions and submitting repository transfers, and plugs it
//! into the core workflow as a `RepositoryDirectory`.

mod client;
mod directory;
mod error;
mod repos;

pub use client::{parse_full_name, GitHubClient};
pub use error::{Error, Result};
