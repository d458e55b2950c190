//! In-memory directory used by the workflow tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::directory::{
    DirectoryError, DirectoryResult, Repository, RepositoryDirectory, SubmitResponse,
};

/// What `get_repository` returns for one `owner/name`, in call order
///
/// When the script runs dry the last entry keeps being returned.
type ProbeScript = VecDeque<DirectoryResult<()>>;

#[derive(Debug, Default)]
pub(crate) struct FakeDirectory {
    listings: HashMap<String, DirectoryResult<Vec<Repository>>>,
    namespace_errors: HashMap<String, DirectoryError>,
    probes: Mutex<HashMap<String, ProbeScript>>,
    permissions: HashMap<String, DirectoryResult<String>>,
    submit_response: Option<DirectoryResult<SubmitResponse>>,
    pub(crate) submitted: Mutex<Vec<(String, String)>>,
    pub(crate) probe_calls: Mutex<Vec<String>>,
    /// Fired the first time the named repository is found
    found_trigger: Option<(String, CancellationToken)>,
}

impl FakeDirectory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Set the listing for a namespace
    pub(crate) fn with_listing(mut self, namespace: &str, repos: Vec<Repository>) -> Self {
        self.listings.insert(namespace.to_string(), Ok(repos));
        self
    }

    pub(crate) fn with_listing_error(mut self, namespace: &str, error: DirectoryError) -> Self {
        self.listings.insert(namespace.to_string(), Err(error));
        self
    }

    /// Make `resolve_namespace` fail for `namespace`
    pub(crate) fn with_namespace_error(mut self, namespace: &str, error: DirectoryError) -> Self {
        self.namespace_errors.insert(namespace.to_string(), error);
        self
    }

    /// Cancel `token` once a probe of `full_name` succeeds
    pub(crate) fn cancel_when_found(mut self, full_name: &str, token: CancellationToken) -> Self {
        self.found_trigger = Some((full_name.to_string(), token));
        self
    }

    /// Script the `get_repository` results for `owner/name`
    pub(crate) fn with_probes(
        self,
        full_name: &str,
        script: Vec<DirectoryResult<()>>,
    ) -> Self {
        self.probes
            .lock()
            .unwrap()
            .insert(full_name.to_string(), script.into());
        self
    }

    pub(crate) fn with_permission(mut self, full_name: &str, level: &str) -> Self {
        self.permissions
            .insert(full_name.to_string(), Ok(level.to_string()));
        self
    }

    pub(crate) fn with_permission_error(mut self, full_name: &str, error: DirectoryError) -> Self {
        self.permissions.insert(full_name.to_string(), Err(error));
        self
    }

    pub(crate) fn with_submit_response(mut self, response: DirectoryResult<SubmitResponse>) -> Self {
        self.submit_response = Some(response);
        self
    }

    pub(crate) fn submit_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    pub(crate) fn probe_count(&self, full_name: &str) -> usize {
        self.probe_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_str() == full_name)
            .count()
    }
}

#[async_trait]
impl RepositoryDirectory for FakeDirectory {
    async fn list_repositories(&self, namespace: &str) -> DirectoryResult<Vec<Repository>> {
        self.listings
            .get(namespace)
            .cloned()
            .unwrap_or_else(|| Err(DirectoryError::NotFound(namespace.to_string())))
    }

    async fn resolve_namespace(&self, namespace: &str) -> DirectoryResult<()> {
        match self.namespace_errors.get(namespace) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn get_repository(&self, namespace: &str, name: &str) -> DirectoryResult<Repository> {
        let full_name = format!("{}/{}", namespace, name);
        self.probe_calls.lock().unwrap().push(full_name.clone());

        let mut probes = self.probes.lock().unwrap();
        let result = match probes.get_mut(&full_name) {
            Some(script) if script.len() > 1 => script.pop_front().unwrap_or(Ok(())),
            Some(script) => script
                .front()
                .cloned()
                .unwrap_or_else(|| Err(DirectoryError::NotFound(full_name.clone()))),
            None => Err(DirectoryError::NotFound(full_name.clone())),
        };

        if result.is_ok() {
            if let Some((trigger, token)) = &self.found_trigger {
                if *trigger == full_name {
                    token.cancel();
                }
            }
        }

        result.map(|()| Repository::new(namespace, name))
    }

    async fn get_caller_permission(&self, namespace: &str, name: &str) -> DirectoryResult<String> {
        let full_name = format!("{}/{}", namespace, name);
        self.permissions
            .get(&full_name)
            .cloned()
            .unwrap_or_else(|| Ok("admin".to_string()))
    }

    async fn submit_transfer(
        &self,
        full_name: &str,
        destination: &str,
    ) -> DirectoryResult<SubmitResponse> {
        self.submitted
            .lock()
            .unwrap()
            .push((full_name.to_string(), destination.to_string()));
        self.submit_response
            .clone()
            .unwrap_or_else(|| Ok(SubmitResponse::accepted("")))
    }
}
