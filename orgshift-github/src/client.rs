//! GitHub API client using octocrab

use crate::{Error, Result};
use octocrab::Octocrab;
use orgshift_core::GitHubConfig;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// User agent sent on raw requests
const USER_AGENT: &str = concat!("orgshift/", env!("CARGO_PKG_VERSION"));

/// GitHub API client for namespace and transfer operations
pub struct GitHubClient {
    client: Octocrab,
    http: reqwest::Client,
    api_url: String,
    token: String,
    login: OnceCell<String>,
}

impl GitHubClient {
    /// Create a client for the given API base URL
    pub fn new(token: impl Into<String>, api_url: &str) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::Auth("GitHub token is empty".to_string()));
        }

        let parsed = url::Url::parse(api_url)
            .map_err(|e| Error::Parse(format!("Invalid API URL '{}': {}", api_url, e)))?;
        let api_url = parsed.as_str().trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.clone())
            .base_uri(api_url.as_str())
            .map_err(|e| Error::Parse(format!("Invalid API URL '{}': {}", api_url, e)))?
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        info!(api_url = %api_url, "Created GitHub client");

        Ok(Self {
            client,
            http,
            api_url,
            token,
            login: OnceCell::new(),
        })
    }

    /// Create a client from the `[github]` config section
    pub fn from_config(config: &GitHubConfig, token: impl Into<String>) -> Result<Self> {
        Self::new(token, &config.api_url)
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// API base URL without trailing slash
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Login of the authenticated user, fetched once
    pub async fn current_login(&self) -> Result<&str> {
        let login = self
            .login
            .get_or_try_init(|| async {
                debug!("Fetching authenticated user");
                let user: UserPayload = self
                    .client
                    .get("/user", None::<&()>)
                    .await
                    .map_err(|e| Error::from_octocrab(e, "authenticated user"))?;
                info!(login = %user.login, "Authenticated");
                Ok::<_, Error>(user.login)
            })
            .await?;
        Ok(login.as_str())
    }
}

#[derive(Debug, serde::Deserialize)]
struct UserPayload {
    login: String,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("login", &self.login.get())
            .finish_non_exhaustive()
    }
}

/// Split `owner/repo` into its parts
pub fn parse_full_name(full_name: &str) -> Result<(&str, &str)> {
    match full_name.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(Error::Parse(format!(
            "Invalid repository name: {}. Expected owner/repo",
            full_name
        ))),
    }
}
