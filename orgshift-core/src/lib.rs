//! Orgshift Core - Core library for moving repositories between namespaces
//!
//! This crate holds the transfer workflow (eligibility checks, submission,
//! completion polling and reporting) behind the [`RepositoryDirectory`]
//! abstraction, so the workflow can run against GitHub or an in-memory fake.

pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod report;
pub mod secrets;
pub mod transfer;

pub use clock::{Clock, SystemClock};
pub use config::{Config, GitHubConfig, OutputConfig, TransferSettings};
pub use directory::{
    DirectoryError, DirectoryResult, Repository, RepositoryDirectory, SubmitResponse, SubmitStatus,
};
pub use error::{Error, Result};
pub use report::{generate_report, ReportRow, TransferReport};
pub use secrets::{GitHubSecrets, Secrets};
pub use transfer::{
    Eligibility, OutcomeStatus, TransferCoordinator, TransferOutcome, TransferRequest,
};
