//! Repository listing, lookup and transfer

use crate::client::parse_full_name;
use crate::{Error, GitHubClient, Result};
use orgshift_core::{Repository, SubmitResponse};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

/// Page size for repository listings (GitHub maximum)
const PER_PAGE: u8 = 100;

/// Repository fields we read from the REST API
#[derive(Debug, Deserialize)]
struct RepoPayload {
    name: String,
    owner: OwnerPayload,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    private: bool,
    #[serde(default)]
    size: u64,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

impl From<RepoPayload> for Repository {
    fn from(repo: RepoPayload) -> Self {
        Repository::new(repo.owner.login, repo.name)
            .with_fork(repo.fork)
            .with_private(repo.private)
            .with_size_kb(repo.size)
    }
}

#[derive(Debug, Serialize)]
struct PageParams<'a> {
    per_page: u8,
    page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    affiliation: Option<&'a str>,
}

/// Organization or user account, only the login is read
#[derive(Debug, Deserialize)]
struct NamespacePayload {
    login: String,
}

#[derive(Debug, Deserialize)]
struct PermissionPayload {
    permission: String,
}

impl GitHubClient {
    /// List every repository in a namespace
    ///
    /// Tries the organization endpoint first and falls back to the user
    /// endpoint when the organization does not exist. `/users/{ns}/repos` only
    /// shows public repositories, so the caller's own account is listed
    /// through `/user/repos` instead.
    pub async fn list_namespace_repos(&self, namespace: &str) -> Result<Vec<Repository>> {
        match self
            .list_all_pages(&format!("/orgs/{}/repos", namespace), namespace, None)
            .await
        {
            Err(Error::NotFound(_)) => self.list_user_repos(namespace).await,
            other => other,
        }
    }

    async fn list_user_repos(&self, namespace: &str) -> Result<Vec<Repository>> {
        let login = self.current_login().await?;
        if !login.eq_ignore_ascii_case(namespace) {
            debug!(namespace, "Not an organization, trying user repositories");
            return self
                .list_all_pages(&format!("/users/{}/repos", namespace), namespace, None)
                .await;
        }

        debug!(namespace, "Listing the authenticated user's own repositories");
        let repos = self
            .list_all_pages("/user/repos", namespace, Some("owner"))
            .await?;
        Ok(repos
            .into_iter()
            .filter(|r| r.owner.eq_ignore_ascii_case(namespace))
            .collect())
    }

    async fn list_all_pages(
        &self,
        route: &str,
        namespace: &str,
        affiliation: Option<&str>,
    ) -> Result<Vec<Repository>> {
        debug!(route, "Listing repositories with pagination");

        let mut all_repos = Vec::new();
        let mut page = 1u32;
        loop {
            let params = PageParams {
                per_page: PER_PAGE,
                page,
                affiliation,
            };
            let batch: Vec<RepoPayload> = self
                .client()
                .get(route, Some(&params))
                .await
                .map_err(|e| Error::from_octocrab(e, namespace))?;

            let fetched = batch.len();
            all_repos.extend(batch.into_iter().map(Repository::from));

            if fetched < usize::from(PER_PAGE) {
                break;
            }
            page += 1;
        }

        info!(namespace, count = all_repos.len(), "Fetched repositories");
        Ok(all_repos)
    }

    /// Look up an organization, then a user, by login
    pub async fn get_namespace(&self, namespace: &str) -> Result<String> {
        debug!(namespace, "Resolving namespace");

        let payload: NamespacePayload = match self
            .client()
            .get(format!("/orgs/{}", namespace), None::<&()>)
            .await
        {
            Ok(org) => org,
            Err(e) => match Error::from_octocrab(e, namespace) {
                Error::NotFound(_) => self
                    .client()
                    .get(format!("/users/{}", namespace), None::<&()>)
                    .await
                    .map_err(|e| Error::from_octocrab(e, namespace))?,
                other => return Err(other),
            },
        };

        Ok(payload.login)
    }

    /// Fetch a single repository
    pub async fn get_repo(&self, owner: &str, name: &str) -> Result<Repository> {
        let full_name = format!("{}/{}", owner, name);
        debug!(repo = %full_name, "Fetching repository");

        let repo: RepoPayload = self
            .client()
            .get(format!("/repos/{}", full_name), None::<&()>)
            .await
            .map_err(|e| Error::from_octocrab(e, &full_name))?;

        Ok(repo.into())
    }

    /// Permission level of the authenticated user on a repository
    pub async fn caller_permission(&self, owner: &str, name: &str) -> Result<String> {
        let login = self.current_login().await?;
        let full_name = format!("{}/{}", owner, name);
        debug!(repo = %full_name, login, "Checking collaborator permission");

        let payload: PermissionPayload = self
            .client()
            .get(
                format!("/repos/{}/collaborators/{}/permission", full_name, login),
                None::<&()>,
            )
            .await
            .map_err(|e| Error::from_octocrab(e, &full_name))?;

        Ok(payload.permission)
    }

    /// Request a transfer of `full_name` to `new_owner`
    ///
    /// GitHub answers 202 Accepted and completes the move asynchronously.
    /// Any other status is returned as a rejected response, not an error.
    pub async fn transfer_repo(&self, full_name: &str, new_owner: &str) -> Result<SubmitResponse> {
        parse_full_name(full_name)?;
        let url = format!("{}/repos/{}/transfer", self.api_url(), full_name);
        debug!(repo = full_name, new_owner, "Submitting transfer");

        let response = self
            .http()
            .post(&url)
            .bearer_auth(self.token())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&json!({ "new_owner": new_owner }))
            .send()
            .await?;

        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());

        if status == StatusCode::ACCEPTED {
            info!(repo = full_name, new_owner, "Transfer accepted");
            Ok(SubmitResponse::accepted(text))
        } else {
            warn!(repo = full_name, status = %status, "Transfer not accepted");
            Ok(SubmitResponse::rejected(Some(status.as_u16()), text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_payload_conversion() {
        let payload: RepoPayload = serde_json::from_value(json!({
            "name": "widgets",
            "full_name": "acme/widgets",
            "owner": { "login": "acme" },
            "fork": true,
            "private": true,
            "size": 2048
        }))
        .unwrap();

        let repo = Repository::from(payload);
        assert_eq!(repo.full_name(), "acme/widgets");
        assert!(repo.is_fork);
        assert!(repo.is_private);
        assert_eq!(repo.size_kb, 2048);
    }

    #[test]
    fn test_repo_payload_defaults() {
        let payload: RepoPayload = serde_json::from_value(json!({
            "name": "widgets",
            "owner": { "login": "acme" }
        }))
        .unwrap();

        let repo = Repository::from(payload);
        assert!(!repo.is_fork);
        assert!(!repo.is_private);
        assert_eq!(repo.size_kb, 0);
    }
}
