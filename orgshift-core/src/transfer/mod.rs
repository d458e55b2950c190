//! Repository transfer workflow
//!
//! A batch lists the source namespace, filters it, and moves each repository
//! one at a time:
//! 1. Check eligibility (fork, name collision, admin permission)
//! 2. Submit the transfer (skipped in dry-run mode)
//! 3. Poll the destination until the repository shows up or time runs out

mod coordinator;
mod eligibility;
mod outcome;
mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::TransferCoordinator;
pub use eligibility::Eligibility;
pub use outcome::{OutcomeStatus, TransferOutcome};
pub use request::TransferRequest;
