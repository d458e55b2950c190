//! Coordinator for moving repositories between namespaces

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::TransferSettings;
use crate::directory::{DirectoryError, Repository, RepositoryDirectory};
use crate::{Error, Result};

use super::{Eligibility, OutcomeStatus, TransferOutcome, TransferRequest};

/// Drives eligibility checks, submission, completion polling and batching
///
/// Work is strictly sequential. The only waits are the throttle between
/// repositories and the sleep between completion probes, both of which race
/// the cancellation token.
#[derive(Debug)]
pub struct TransferCoordinator<D, C = SystemClock> {
    directory: D,
    clock: C,
    settings: TransferSettings,
    cancel: CancellationToken,
}

impl<D: RepositoryDirectory> TransferCoordinator<D> {
    /// Create a coordinator on the system clock
    pub fn new(directory: D, settings: TransferSettings) -> Self {
        Self::with_clock(directory, settings, SystemClock)
    }
}

impl<D: RepositoryDirectory, C: Clock> TransferCoordinator<D, C> {
    /// Create a coordinator with a custom clock
    pub fn with_clock(directory: D, settings: TransferSettings, clock: C) -> Self {
        Self {
            directory,
            clock,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that stops the batch at the next iteration or poll tick
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn settings(&self) -> &TransferSettings {
        &self.settings
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// List a namespace, mapping failure to a run-level error
    pub async fn list_source(&self, namespace: &str) -> Result<Vec<Repository>> {
        let repos = self
            .directory
            .list_repositories(namespace)
            .await
            .map_err(|source| Error::Listing {
                namespace: namespace.to_string(),
                source,
            })?;

        info!(namespace, count = repos.len(), "Listed repositories");
        Ok(repos)
    }

    /// Run the pre-submission checks, stopping at the first failure
    ///
    /// Order: fork, destination namespace and name collision, caller admin
    /// permission.
    pub async fn check_eligibility(&self, repository: &Repository, destination: &str) -> Eligibility {
        if repository.is_fork {
            return Eligibility::ineligible(
                "fork repositories cannot be transferred (platform restriction)",
            );
        }

        // A missing namespace also answers 404 for every repository under it
        if let Err(e) = self.directory.resolve_namespace(destination).await {
            return Eligibility::ineligible(format!(
                "cannot access destination namespace '{}': {}",
                destination, e
            ));
        }

        match self
            .directory
            .get_repository(destination, &repository.name)
            .await
        {
            Ok(_) => {
                return Eligibility::ineligible(format!(
                    "a repository named '{}' already exists in '{}'",
                    repository.name, destination
                ));
            }
            Err(DirectoryError::NotFound(_)) => {}
            Err(e) => {
                return Eligibility::ineligible(format!(
                    "cannot access destination namespace '{}': {}",
                    destination, e
                ));
            }
        }

        match self
            .directory
            .get_caller_permission(&repository.owner, &repository.name)
            .await
        {
            Ok(level) if level == "admin" => {}
            Ok(level) => {
                return Eligibility::ineligible(format!(
                    "admin permission required on '{}' (current: {})",
                    repository.name, level
                ));
            }
            Err(e) => {
                return Eligibility::ineligible(format!("failed to check permission: {}", e));
            }
        }

        Eligibility::eligible(repository.is_private)
    }

    /// Move one repository and report how it ended
    pub async fn transfer_one(
        &self,
        repository: &Repository,
        destination: &str,
        dry_run: bool,
        poll_timeout: Duration,
    ) -> TransferOutcome {
        let eligibility = self.check_eligibility(repository, destination).await;
        if !eligibility.eligible {
            warn!(repo = %repository.name, reason = %eligibility.reason, "Skipping transfer");
            return TransferOutcome::failed(
                &repository.name,
                OutcomeStatus::Ineligible,
                eligibility.reason,
            );
        }

        if dry_run {
            info!(repo = %repository.name, destination, "[DRY RUN] Would transfer repository");
            return TransferOutcome::dry_run(&repository.name, "dry run: no transfer performed");
        }

        let full_name = repository.full_name();
        let response = match self.directory.submit_transfer(&full_name, destination).await {
            Ok(response) => response,
            Err(e) => {
                warn!(repo = %full_name, error = %e, "Transfer request failed");
                return TransferOutcome::failed(
                    &repository.name,
                    OutcomeStatus::Error,
                    format!("transfer request failed: {}", e),
                );
            }
        };

        if !response.is_accepted() {
            let code = response
                .code
                .map_or_else(|| "-".to_string(), |c| c.to_string());
            warn!(repo = %full_name, code = %code, details = %response.details, "Transfer rejected");
            return TransferOutcome::failed(
                &repository.name,
                OutcomeStatus::Rejected,
                format!("transfer rejected: {} - {}", code, response.details),
            );
        }

        info!(repo = %full_name, destination, "Transfer accepted, waiting for completion");
        self.await_completion(&repository.name, destination, poll_timeout)
            .await
    }

    /// Probe the destination until the repository appears
    ///
    /// Each tick waits one interval and then probes; probe errors count as
    /// "not there yet".
    async fn await_completion(
        &self,
        name: &str,
        destination: &str,
        poll_timeout: Duration,
    ) -> TransferOutcome {
        let interval = self.settings.poll_interval;
        let started = self.clock.now();
        let mut attempt = 0u32;

        while self.clock.now().duration_since(started) < poll_timeout {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return cancelled_while_polling(name);
                }
                _ = self.clock.sleep(interval) => {}
            }

            if self.cancel.is_cancelled() {
                return cancelled_while_polling(name);
            }

            attempt += 1;
            match self.directory.repository_exists(destination, name).await {
                Ok(true) => {
                    info!(repo = name, destination, attempt, "Transfer completed");
                    return TransferOutcome::completed(name);
                }
                Ok(false) => debug!(repo = name, attempt, "Not at destination yet"),
                Err(e) => debug!(repo = name, attempt, error = %e, "Completion probe failed"),
            }
        }

        warn!(repo = name, destination, timeout = ?poll_timeout, "Transfer timed out");
        TransferOutcome::failed(
            name,
            OutcomeStatus::Unconfirmed,
            "transfer timed out; completion unconfirmed",
        )
    }

    /// Process every repository the request selects, one at a time
    ///
    /// Fails only when the source namespace cannot be listed. Outcomes come
    /// back in listing order, followed by `Missing` outcomes when the request
    /// asks for them.
    pub async fn batch_transfer(&self, request: &TransferRequest) -> Result<Vec<TransferOutcome>> {
        info!(
            source = %request.source,
            destination = %request.destination,
            dry_run = request.dry_run,
            "Starting batch transfer"
        );

        let listed = self.list_source(&request.source).await?;
        let selected: Vec<&Repository> = listed.iter().filter(|r| request.includes(&r.name)).collect();

        if request.repos.is_some() {
            info!(count = selected.len(), "Repositories after filter");
        }

        let mut outcomes = Vec::with_capacity(selected.len());
        for (index, repository) in selected.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(remaining = selected.len() - index, "Batch cancelled");
                break;
            }

            if index > 0 && !request.dry_run && !self.settings.throttle.is_zero() {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => {
                        warn!(remaining = selected.len() - index, "Batch cancelled");
                        break;
                    }
                    _ = self.clock.sleep(self.settings.throttle) => {}
                }
            }

            info!(
                progress = %format!("{}/{}", index + 1, selected.len()),
                repo = %repository.name,
                "Processing"
            );

            let outcome = self
                .transfer_one(
                    repository,
                    &request.destination,
                    request.dry_run,
                    self.settings.poll_timeout,
                )
                .await;
            outcomes.push(outcome);
        }

        if request.report_missing && !self.cancel.is_cancelled() {
            for name in missing_names(request, &listed) {
                warn!(repo = %name, source = %request.source, "Repository not found in source");
                outcomes.push(TransferOutcome::failed(
                    name,
                    OutcomeStatus::Missing,
                    format!("repository not found in '{}'", request.source),
                ));
            }
        }

        Ok(outcomes)
    }
}

fn cancelled_while_polling(name: &str) -> TransferOutcome {
    warn!(repo = name, "Cancelled while waiting for transfer completion");
    TransferOutcome::failed(
        name,
        OutcomeStatus::Cancelled,
        "cancelled while awaiting completion; transfer unconfirmed",
    )
}

/// Filter names with no match in the listing, deduplicated, in filter order
fn missing_names<'a>(request: &'a TransferRequest, listed: &[Repository]) -> Vec<&'a str> {
    let mut missing: Vec<&str> = Vec::new();
    for name in request.repos.iter().flatten() {
        if !listed.iter().any(|r| &r.name == name) && !missing.contains(&name.as_str()) {
            missing.push(name);
        }
    }
    missing
}
