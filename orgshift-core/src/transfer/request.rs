use serde::{Deserialize, Serialize};

/// One batch of transfers from `source` to `destination`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Namespace the repositories currently live in
    pub source: String,
    /// Namespace to move them to
    pub destination: String,
    /// Only these repository names; `None` means everything in `source`
    pub repos: Option<Vec<String>>,
    /// Run every check but never submit
    pub dry_run: bool,
    /// Emit a failed outcome for filter names missing from `source`
    pub report_missing: bool,
}

impl TransferRequest {
    /// Create a request for every repository in `source`
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            repos: None,
            dry_run: false,
            report_missing: false,
        }
    }

    /// Restrict to the named repositories
    pub fn with_repos<I, S>(mut self, repos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repos = Some(repos.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a comma-separated filter such as `"api, web,docs"`
    ///
    /// Blank entries are ignored; an all-blank list yields no filter.
    pub fn with_repo_list(self, list: &str) -> Self {
        let names: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if names.is_empty() {
            self
        } else {
            self.with_repos(names)
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_report_missing(mut self, report_missing: bool) -> Self {
        self.report_missing = report_missing;
        self
    }

    /// Whether `name` passes the filter
    pub fn includes(&self, name: &str) -> bool {
        self.repos
            .as_ref()
            .map_or(true, |repos| repos.iter().any(|r| r == name))
    }
}
