use serde::{Deserialize, Serialize};

use super::defaults;

/// Upstream feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Full URL of the pull endpoint.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Initial backoff in milliseconds (doubles each retry).
    pub initial_backoff_ms: u64,
    /// Backoff ceiling in milliseconds.
    pub max_backoff_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: defaults::DEFAULT_FEED_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_FEED_MAX_RETRIES,
            initial_backoff_ms: defaults::DEFAULT_FEED_INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::DEFAULT_FEED_MAX_BACKOFF_MS,
        }
    }
}
