//! HTTP client with retry, exponential backoff, timeout, and gzip.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use augur_core::config::{AdjudicatorConfig, FeedConfig};
use augur_core::errors::{AugurError, AugurResult, FeedError};

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Doubles each retry.
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from(&FeedConfig::default())
    }
}

impl From<&FeedConfig> for HttpClientConfig {
    fn from(config: &FeedConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }
}

impl From<&AdjudicatorConfig> for HttpClientConfig {
    /// A single attempt: a slow adjudicator must not stall the cycle.
    fn from(config: &AdjudicatorConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }
}

/// Blocking client. Server errors and transport failures are retried;
/// client errors (4xx) fail immediately.
#[derive(Debug)]
pub struct HttpClient {
    config: HttpClientConfig,
    client: Client,
    bearer_token: Option<String>,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> AugurResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| FeedError::Unreachable {
                reason: format!("client build failed: {e}"),
            })?;
        Ok(Self {
            config,
            client,
            bearer_token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token;
        self
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET `url` and return the body text.
    pub fn get_text(&self, url: &str) -> AugurResult<String> {
        self.send_with_retry(url, || self.client.get(url))
    }

    /// POST `payload` as JSON and return the body text.
    pub fn post_json<Req: Serialize>(&self, url: &str, payload: &Req) -> AugurResult<String> {
        self.send_with_retry(url, || self.client.post(url).json(payload))
    }

    fn send_with_retry<F>(&self, url: &str, build: F) -> AugurResult<String>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut backoff = self.config.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                warn!(
                    event = "degradation",
                    component = "http",
                    url,
                    attempt,
                    max_retries = self.config.max_retries,
                    backoff_ms = backoff.as_millis() as u64,
                    last_error = %last_err,
                    "retrying request"
                );
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            let mut request = build();
            if let Some(token) = &self.bearer_token {
                request = request.bearer_auth(token);
            }

            match request.send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        debug!(url, attempt, status = status.as_u16(), "request ok");
                        return resp.text().map_err(|e| {
                            AugurError::from(FeedError::Malformed {
                                reason: format!("body read failed: {e}"),
                            })
                        });
                    }
                    if status.is_client_error() {
                        let body = resp.text().unwrap_or_default();
                        return Err(FeedError::HttpStatus {
                            status: status.as_u16(),
                            body,
                        }
                        .into());
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => {
                    last_err = e.to_string();
                }
            }
        }

        Err(FeedError::RetriesExhausted {
            attempts: self.config.max_retries + 1,
            last_error: last_err,
        }
        .into())
    }
}
