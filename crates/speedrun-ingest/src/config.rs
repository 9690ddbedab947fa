//! Configuration for talking to the speedrun.com API
//!
//! Defaults are named constants; every value can be overridden from the
//! environment with [`ApiConfig::from_env`] or in code with the `with_*`
//! builders.

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// API Configuration Constants
// ============================================================================

/// Public speedrun.com REST API.
pub const DEFAULT_API_URL: &str = "https://www.speedrun.com/api/v1";

/// Runs requested per page. Also the largest page the API serves.
pub const DEFAULT_RUNS_PER_PAGE: u32 = 200;

/// Upper bound accepted by the API for the `max` parameter.
pub const MAX_RUNS_PER_PAGE: u32 = 200;

/// Request timeout in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Pause between two category collections, to stay under the rate limit.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Records collected per (game, category) before pagination stops.
pub const DEFAULT_MAX_RUNS: usize = 1000;

/// API access configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,

    /// Sent as the `User-Agent` header
    pub user_agent: String,

    /// Page size for run listings (1..=200)
    pub runs_per_page: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Delay between category collections in milliseconds
    pub request_delay_ms: u64,

    /// Collector cap per (game, category)
    pub max_runs: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: default_user_agent(),
            runs_per_page: DEFAULT_RUNS_PER_PAGE,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            max_runs: DEFAULT_MAX_RUNS,
        }
    }
}

fn default_user_agent() -> String {
    format!("speedrun-analytics/{}", env!("CARGO_PKG_VERSION"))
}

impl ApiConfig {
    /// Load configuration from environment variables
    ///
    /// - `SPEEDRUN_API_URL`
    /// - `SPEEDRUN_USER_AGENT`
    /// - `SPEEDRUN_RUNS_PER_PAGE`
    /// - `SPEEDRUN_API_TIMEOUT_SECS`
    /// - `SPEEDRUN_REQUEST_DELAY_MS`
    /// - `SPEEDRUN_MAX_RUNS`
    ///
    /// Numeric values that do not parse are a configuration error rather
    /// than silently replaced by the default.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SPEEDRUN_API_URL") {
            config = config.with_base_url(url);
        }
        if let Ok(agent) = std::env::var("SPEEDRUN_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(size) = env_number::<u32>("SPEEDRUN_RUNS_PER_PAGE")? {
            config = config.with_runs_per_page(size);
        }
        if let Some(secs) = env_number("SPEEDRUN_API_TIMEOUT_SECS")? {
            config.timeout_secs = secs;
        }
        if let Some(ms) = env_number("SPEEDRUN_REQUEST_DELAY_MS")? {
            config.request_delay_ms = ms;
        }
        if let Some(max) = env_number("SPEEDRUN_MAX_RUNS")? {
            config.max_runs = max;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the API base URL (a trailing slash is dropped)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the page size, clamped to what the API accepts
    pub fn with_runs_per_page(mut self, size: u32) -> Self {
        self.runs_per_page = size.clamp(1, MAX_RUNS_PER_PAGE);
        self
    }

    pub fn with_request_delay_ms(mut self, ms: u64) -> Self {
        self.request_delay_ms = ms;
        self
    }

    pub fn with_max_runs(mut self, max: usize) -> Self {
        self.max_runs = max;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(IngestError::config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(IngestError::config("API timeout must be at least one second"));
        }
        Ok(())
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| IngestError::config(format!("{} must be a number, got '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}
