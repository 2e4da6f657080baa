use tracing::info;

use augur_core::config::FeedConfig;
use augur_core::errors::{AugurResult, FeedError};
use augur_core::models::Observation;
use augur_core::traits::FeedSource;

use super::envelope::parse_page;
use crate::transport::{HttpClient, HttpClientConfig};

/// Pulls the most recent page from the configured URL.
pub struct HttpFeed {
    url: String,
    client: HttpClient,
}

impl HttpFeed {
    pub fn new(config: &FeedConfig) -> AugurResult<Self> {
        if config.url.trim().is_empty() {
            return Err(FeedError::Unreachable {
                reason: "feed.url is not configured".to_string(),
            }
            .into());
        }
        Ok(Self {
            url: config.url.clone(),
            client: HttpClient::new(HttpClientConfig::from(config))?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for HttpFeed {
    fn fetch(&self) -> AugurResult<Vec<Observation>> {
        let body = self.client.get_text(&self.url)?;
        let page = parse_page(&body)?;
        info!(url = %self.url, observations = page.len(), "feed page fetched");
        Ok(page)
    }
}
