use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a single repository's transfer ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Transfer accepted and the repository appeared under the destination
    Completed,
    /// Every check passed; nothing was submitted
    DryRun,
    /// Failed an eligibility check; nothing was submitted
    Ineligible,
    /// The platform declined the submission
    Rejected,
    /// Accepted, but not seen at the destination before the timeout
    Unconfirmed,
    /// The batch was cancelled while waiting for completion
    Cancelled,
    /// Named in the filter but absent from the source namespace
    Missing,
    /// The submission itself could not be made
    Error,
}

impl OutcomeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Completed | OutcomeStatus::DryRun)
    }

    /// Submitted, but whether it went through is not known
    pub fn is_unconfirmed(&self) -> bool {
        matches!(self, OutcomeStatus::Unconfirmed | OutcomeStatus::Cancelled)
    }

    /// Short label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeStatus::Completed => "success",
            OutcomeStatus::DryRun => "success (dry run)",
            OutcomeStatus::Unconfirmed | OutcomeStatus::Cancelled => "unconfirmed",
            OutcomeStatus::Ineligible
            | OutcomeStatus::Rejected
            | OutcomeStatus::Missing
            | OutcomeStatus::Error => "failed",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of processing one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// Repository name
    pub repository: String,
    /// Leaf state reached
    pub status: OutcomeStatus,
    /// Human-readable reason or error
    pub reason: Option<String>,
    /// When the transfer finished (completed or dry-run)
    pub completed_at: Option<DateTime<Utc>>,
}

impl TransferOutcome {
    fn new(repository: impl Into<String>, status: OutcomeStatus, reason: Option<String>) -> Self {
        Self {
            repository: repository.into(),
            status,
            reason,
            completed_at: None,
        }
    }

    pub fn completed(repository: impl Into<String>) -> Self {
        Self {
            completed_at: Some(Utc::now()),
            ..Self::new(repository, OutcomeStatus::Completed, None)
        }
    }

    pub fn dry_run(repository: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            completed_at: Some(Utc::now()),
            ..Self::new(repository, OutcomeStatus::DryRun, Some(reason.into()))
        }
    }

    /// A non-successful outcome with a reason
    pub fn failed(
        repository: impl Into<String>,
        status: OutcomeStatus,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(repository, status, Some(reason.into()))
    }

    pub fn succeeded(&self) -> bool {
        self.status.is_success()
    }
}
