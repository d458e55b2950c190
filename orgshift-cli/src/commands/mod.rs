//! CLI command implementations

pub mod list_repos;
pub mod transfer;

pub use list_repos::ListReposArgs;
pub use transfer::TransferArgs;

use orgshift_core::{Config, Secrets};
use orgshift_github::GitHubClient;

/// Build a GitHub client from config and whichever token source is available
pub(crate) fn github_client(config: &Config, token: Option<&str>) -> anyhow::Result<GitHubClient> {
    // The secrets file is only read when no token was passed in
    let secrets = if token.is_some_and(|t| !t.trim().is_empty()) {
        Secrets::default()
    } else {
        Secrets::load()?
    };
    let token = secrets.resolve_token(token)?;
    Ok(GitHubClient::from_config(&config.github, token)?)
}
