//! Transport failure paths that need no live server.

use std::time::Duration;

use augur_core::config::{AdjudicatorConfig, FeedConfig};
use augur_core::errors::{AugurError, FeedError};
use augur_core::models::{Label, Mode};
use augur_core::traits::{Adjudicator, FeedSource};
use augur_feed::{HttpAdjudicator, HttpClient, HttpClientConfig, HttpFeed};

/// Nothing listens on port 9 (discard) on loopback in test environments.
const DEAD_URL: &str = "http://127.0.0.1:9/feed";

#[test]
fn unconfigured_feed_is_rejected() {
    let err = HttpFeed::new(&FeedConfig::default()).err().unwrap();
    assert!(matches!(
        err,
        AugurError::FeedError(FeedError::Unreachable { .. })
    ));
}

#[test]
fn unreachable_feed_exhausts_retries() {
    let config = FeedConfig {
        url: DEAD_URL.to_string(),
        timeout_secs: 2,
        max_retries: 1,
        initial_backoff_ms: 1,
        max_backoff_ms: 2,
    };
    let feed = HttpFeed::new(&config).unwrap();
    assert_eq!(feed.url(), DEAD_URL);
    match feed.fetch() {
        Err(AugurError::FeedError(FeedError::RetriesExhausted { attempts, .. })) => {
            assert_eq!(attempts, 2);
        }
        other => panic!("expected exhausted retries, got {other:?}"),
    }
}

#[test]
fn client_config_follows_feed_config() {
    let config = FeedConfig {
        timeout_secs: 4,
        max_retries: 6,
        initial_backoff_ms: 100,
        max_backoff_ms: 900,
        ..FeedConfig::default()
    };
    let client = HttpClient::new(HttpClientConfig::from(&config)).unwrap();
    assert_eq!(client.config().timeout, Duration::from_secs(4));
    assert_eq!(client.config().max_retries, 6);
    assert_eq!(client.config().max_backoff, Duration::from_millis(900));
}

#[test]
fn adjudicator_makes_a_single_attempt() {
    let config = AdjudicatorConfig {
        enabled: true,
        endpoint: DEAD_URL.to_string(),
        model: "test".to_string(),
        timeout_secs: 2,
        ..AdjudicatorConfig::default()
    };
    assert_eq!(HttpClientConfig::from(&config).max_retries, 0);

    let adjudicator = HttpAdjudicator::new(&config).unwrap();
    let err = adjudicator
        .predict(Mode::Color, &[], &[Label::Red])
        .unwrap_err();
    assert!(matches!(err, AugurError::AdjudicatorError { .. }));
}

#[test]
fn adjudicator_requires_endpoint() {
    assert!(HttpAdjudicator::new(&AdjudicatorConfig::default()).is_err());
}
