//! `RepositoryDirectory` backed by the GitHub REST API

use async_trait::async_trait;
use orgshift_core::{DirectoryResult, Repository, RepositoryDirectory, SubmitResponse};

use crate::GitHubClient;

#[async_trait]
impl RepositoryDirectory for GitHubClient {
    async fn list_repositories(&self, namespace: &str) -> DirectoryResult<Vec<Repository>> {
        Ok(self.list_namespace_repos(namespace).await?)
    }

    async fn resolve_namespace(&self, namespace: &str) -> DirectoryResult<()> {
        self.get_namespace(namespace).await?;
        Ok(())
    }

    async fn get_repository(&self, namespace: &str, name: &str) -> DirectoryResult<Repository> {
        Ok(self.get_repo(namespace, name).await?)
    }

    async fn get_caller_permission(&self, namespace: &str, name: &str) -> DirectoryResult<String> {
        Ok(self.caller_permission(namespace, name).await?)
    }

    async fn submit_transfer(
        &self,
        full_name: &str,
        destination: &str,
    ) -> DirectoryResult<SubmitResponse> {
        Ok(self.transfer_repo(full_name, destination).await?)
    }
}
