//! Sync configuration: TOML file, environment, then explicit overrides.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable holding the backend base URL.
pub const ENV_API_URL: &str = "NOUGHTS_API_URL";
/// Environment variable holding the debounce quiet period in milliseconds.
pub const ENV_DEBOUNCE_MS: &str = "NOUGHTS_DEBOUNCE_MS";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "NOUGHTS_TIMEOUT_SECS";

/// Configuration for remote sync.
///
/// Sync is disabled when no (non-blank) base URL is configured.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the persistence backend, e.g. `http://localhost:8000`.
    #[getter(skip)]
    #[serde(default)]
    api_base_url: Option<String>,

    /// Quiet period before a change is saved.
    #[serde(default = "default_debounce_ms")]
    debounce_ms: u64,

    /// Per-request timeout.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            debounce_ms: default_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SyncConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading sync config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(enabled = config.is_enabled(), "Sync config loaded");
        Ok(config)
    }

    /// Applies overrides from the process environment.
    #[instrument(skip(self))]
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup (the environment in practice).
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "API URL from environment");
            self.api_base_url = Some(url);
        }
        if let Some(ms) = lookup(ENV_DEBOUNCE_MS) {
            self.debounce_ms = ms.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {} '{}': {}", ENV_DEBOUNCE_MS, ms, e))
            })?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = secs.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {} '{}': {}", ENV_TIMEOUT_SECS, secs, e))
            })?;
        }
        Ok(self)
    }

    /// Overrides the base URL when `url` is set.
    pub fn with_api_base_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.api_base_url = url;
        }
        self
    }

    /// Overrides the debounce period when `ms` is set.
    pub fn with_debounce_ms(mut self, ms: Option<u64>) -> Self {
        if let Some(ms) = ms {
            self.debounce_ms = ms;
        }
        self
    }

    /// Normalised base URL: trimmed, without trailing slash, `None` if blank.
    pub fn base_url(&self) -> Option<&str> {
        self.api_base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    /// True when a base URL is configured.
    pub fn is_enabled(&self) -> bool {
        self.base_url().is_some()
    }

    /// Debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
