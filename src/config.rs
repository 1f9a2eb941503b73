//! Client configuration: base endpoint and request timeout.
//!
//! These are process-wide constants, not per-call options. Environment
//! overrides exist so the CLI and tests can point at a different server
//! without recompiling.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fixed transport configuration shared by every remote call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base endpoint, no trailing slash.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Build a config for the given base URL, trimming any trailing slash.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Load from `WEIQI_BASE_URL` and `WEIQI_TIMEOUT_SECS`, falling back to
    /// the defaults. A malformed timeout value is ignored with a warning
    /// rather than failing startup.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = std::env::var("WEIQI_BASE_URL")
            .map_or_else(|_| Self::default(), |url| Self::new(&url));

        if let Ok(raw) = std::env::var("WEIQI_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "ignoring invalid WEIQI_TIMEOUT_SECS"),
            }
        }

        config
    }
}
