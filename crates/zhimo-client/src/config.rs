//! Client configuration.

use zhimo_core::defaults;

/// Configuration for the transport client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are appended to.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_BASE_URL.to_string(),
            timeout_secs: defaults::API_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `ZHIMO_API_BASE_URL` | `https://zhimo-backend.zeabur.app/api` | Backend base URL |
    /// | `ZHIMO_API_TIMEOUT` | `30` | Request timeout (seconds) |
    pub fn from_env() -> Self {
        let base_url = std::env::var("ZHIMO_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| defaults::API_BASE_URL.to_string());

        let timeout_secs = std::env::var("ZHIMO_API_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::API_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_secs,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Attempt budget and spacing of the document status poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of status fetches.
    pub max_attempts: u32,
    /// Delay after every non-terminal attempt, in milliseconds.
    pub interval_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::POLL_MAX_ATTEMPTS,
            interval_ms: defaults::POLL_INTERVAL_MS,
        }
    }
}

impl PollConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `ZHIMO_POLL_MAX_ATTEMPTS` | `30` | Status fetches before timing out |
    /// | `ZHIMO_POLL_INTERVAL_MS` | `2000` | Delay between fetches |
    pub fn from_env() -> Self {
        let max_attempts = std::env::var("ZHIMO_POLL_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults::POLL_MAX_ATTEMPTS);

        let interval_ms = std::env::var("ZHIMO_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::POLL_INTERVAL_MS);

        Self {
            max_attempts,
            interval_ms,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_interval(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }
}
