use tracing::debug;

use augur_core::config::AdjudicatorConfig;
use augur_core::errors::{AugurError, AugurResult};
use augur_core::models::{Label, Mode};
use augur_core::traits::{Adjudicator, RuleSummary};

use super::prompt::{build_request, parse_response};
use crate::transport::{HttpClient, HttpClientConfig};

/// Asks a chat-completions endpoint for the next label.
///
/// Transport failures surface as [`AugurError::AdjudicatorError`];
/// unparsable answers are `Ok(None)`.
pub struct HttpAdjudicator {
    endpoint: String,
    model: String,
    client: HttpClient,
}

impl HttpAdjudicator {
    /// The bearer token is read from the environment variable named by
    /// `api_key_env`; a missing variable sends no auth header.
    pub fn new(config: &AdjudicatorConfig) -> AugurResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(AugurError::AdjudicatorError {
                reason: "adjudicator.endpoint is not configured".to_string(),
            });
        }
        let token = std::env::var(&config.api_key_env).ok();
        let client = HttpClient::new(HttpClientConfig::from(config))?.with_bearer_token(token);
        Ok(Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            client,
        })
    }
}

impl Adjudicator for HttpAdjudicator {
    fn predict(
        &self,
        mode: Mode,
        rules: &[RuleSummary],
        recent: &[Label],
    ) -> AugurResult<Option<Label>> {
        let request = build_request(&self.model, mode, rules, recent);
        let body = self
            .client
            .post_json(&self.endpoint, &request)
            .map_err(|e| AugurError::AdjudicatorError {
                reason: e.to_string(),
            })?;
        let label = parse_response(&body, mode);
        debug!(%mode, ?label, "adjudicator answered");
        Ok(label)
    }
}
