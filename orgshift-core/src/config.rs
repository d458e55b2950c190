//! Configuration management for Orgshift
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (ORGSHIFT_*)
//! 3. Config file (~/.config/orgshift/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// GitHub REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Timing of the transfer workflow
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransferSettings {
    /// Wait between destination probes after a transfer is accepted
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Give up confirming a transfer after this long
    #[serde(with = "humantime_serde")]
    pub poll_timeout: Duration,

    /// Pause between repositories in a non-dry-run batch
    #[serde(with = "humantime_serde")]
    pub throttle: Duration,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            poll_timeout: Duration::from_secs(300),
            throttle: Duration::from_secs(2),
        }
    }
}

/// GitHub connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL (override for GitHub Enterprise)
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Where reports and logs go
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for timestamped transfer reports
    pub report_dir: PathBuf,

    /// Log file mirrored from the console; `None` disables it
    pub log_file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("."),
            log_file: Some(PathBuf::from("transfer.log")),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub transfer: TransferSettings,
    pub github: GitHubConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/orgshift/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("orgshift").join("config.toml"))
    }

    /// Reject settings the workflow cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.transfer.poll_interval.is_zero() {
            return Err(Error::Config("poll_interval must be greater than zero".into()));
        }
        url::Url::parse(&self.github.api_url)
            .map_err(|e| Error::Config(format!("Invalid api_url '{}': {}", self.github.api_url, e)))?;
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables (durations in whole seconds):
    /// - ORGSHIFT_RATE_LIMIT_DELAY: pause between repositories
    /// - ORGSHIFT_TRANSFER_TIMEOUT: completion polling budget
    /// - ORGSHIFT_POLL_INTERVAL: wait between completion probes
    /// - ORGSHIFT_API_URL: GitHub API base URL
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(delay) = lookup("ORGSHIFT_RATE_LIMIT_DELAY") {
            self.transfer.throttle = parse_seconds("ORGSHIFT_RATE_LIMIT_DELAY", &delay)?;
        }

        if let Some(timeout) = lookup("ORGSHIFT_TRANSFER_TIMEOUT") {
            self.transfer.poll_timeout = parse_seconds("ORGSHIFT_TRANSFER_TIMEOUT", &timeout)?;
        }

        if let Some(interval) = lookup("ORGSHIFT_POLL_INTERVAL") {
            self.transfer.poll_interval = parse_seconds("ORGSHIFT_POLL_INTERVAL", &interval)?;
        }

        if let Some(api_url) = lookup("ORGSHIFT_API_URL") {
            self.github.api_url = api_url;
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, poll_timeout: Option<u64>, report_dir: Option<PathBuf>) -> Self {
        if let Some(secs) = poll_timeout {
            self.transfer.poll_timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = report_dir {
            self.output.report_dir = dir;
        }

        self
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| Error::Config(format!("{} must be a number of seconds, got '{}': {}", key, value, e)))
}
