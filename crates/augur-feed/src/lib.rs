//! # augur-feed
//!
//! Outbound HTTP adapters. [`HttpFeed`] implements
//! [`FeedSource`](augur_core::traits::FeedSource) over the upstream pull
//! endpoint; [`HttpAdjudicator`] implements
//! [`Adjudicator`](augur_core::traits::Adjudicator) over a chat-completions
//! style API. Both share the retrying [`HttpClient`].

pub mod adjudicator;
pub mod feed;
pub mod transport;

pub use adjudicator::HttpAdjudicator;
pub use feed::HttpFeed;
pub use transport::{HttpClient, HttpClientConfig};
