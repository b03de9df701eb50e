//! Configuration models for `.skysearch/config.toml`.

use serde::Deserialize;
use std::time::Duration;

/// Settings for the task backend HTTP client.
///
/// # Example
///
/// ```toml
/// # .skysearch/config.toml
/// [backend]
/// base_url = "https://api.example.com"
/// api_token = "..."
/// request_timeout_secs = 30
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the flight search service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout for individual HTTP calls. Unrelated to the
    /// search-level timeout in [`PollingSettings`].
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Timing settings for the delayed poll sequence.
///
/// The defaults encode what is known about the deep-search pipeline: it
/// takes 60-120s, so the first status check waits out an 80s grace
/// delay, then checks every 3s up to a 10 minute ceiling.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingSettings {
    /// Delay before the first status check.
    #[serde(default = "default_grace_delay_ms")]
    pub grace_delay_ms: u64,

    /// Cadence of status checks after the grace delay.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Wall-clock ceiling on the whole search, measured from submission.
    #[serde(default = "default_overall_timeout_ms")]
    pub overall_timeout_ms: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            grace_delay_ms: default_grace_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            overall_timeout_ms: default_overall_timeout_ms(),
        }
    }
}

impl PollingSettings {
    pub fn grace_delay(&self) -> Duration {
        Duration::from_millis(self.grace_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_millis(self.overall_timeout_ms)
    }
}

/// Unified application configuration loaded from `.skysearch/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Poll timing settings.
    #[serde(default)]
    pub polling: PollingSettings,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_grace_delay_ms() -> u64 {
    80_000
}

fn default_poll_interval_ms() -> u64 {
    3_000
}

fn default_overall_timeout_ms() -> u64 {
    600_000
}
