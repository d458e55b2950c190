//! Transfer command - move repositories from one namespace to another

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Args;
use orgshift_core::{generate_report, Config, TransferCoordinator, TransferReport, TransferRequest};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Arguments for the transfer command
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Namespace to move repositories out of
    #[arg(long)]
    pub source_org: String,

    /// Namespace to move repositories into
    #[arg(long)]
    pub target_org: String,

    /// Only these repositories (comma-separated)
    #[arg(long)]
    pub repos: Option<String>,

    /// Run every check without transferring anything
    #[arg(long)]
    pub dry_run: bool,

    /// Report filter names that do not exist in the source as failures
    #[arg(long)]
    pub report_missing: bool,

    /// Seconds to wait for each transfer to show up at the destination
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory for the report file
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

impl TransferArgs {
    fn request(&self) -> TransferRequest {
        let request = TransferRequest::new(&self.source_org, &self.target_org)
            .with_dry_run(self.dry_run)
            .with_report_missing(self.report_missing);

        match &self.repos {
            Some(list) => request.with_repo_list(list),
            None => request,
        }
    }

    /// Execute the transfer command
    pub async fn execute(&self, config: &Config, token: Option<&str>) -> anyhow::Result<()> {
        let config = config
            .clone()
            .with_cli_overrides(self.timeout, self.report_dir.clone());
        let client = super::github_client(&config, token)?;

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping after the current step");
                on_interrupt.cancel();
            }
        });

        let coordinator =
            TransferCoordinator::new(client, config.transfer.clone()).with_cancellation(cancel);
        let request = self.request();

        if request.dry_run {
            println!("Dry run: {} -> {}", request.source, request.destination);
        } else {
            println!("Starting transfer: {} -> {}", request.source, request.destination);
        }

        let outcomes = coordinator.batch_transfer(&request).await?;

        let report = generate_report(&outcomes);
        println!();
        println!("{}", report);

        let path = write_report(&config.output.report_dir, &report, Local::now())?;
        info!(path = %path.display(), "Report saved");
        println!();
        println!("Report saved to {}", path.display());

        Ok(())
    }
}

/// Write `report` to `transfer_report_YYYYMMDD_HHMMSS.txt` under `dir`
fn write_report(dir: &Path, report: &TransferReport, now: DateTime<Local>) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("transfer_report_{}.txt", now.format("%Y%m%d_%H%M%S")));
    std::fs::write(&path, report.to_string())?;
    Ok(path)
}
