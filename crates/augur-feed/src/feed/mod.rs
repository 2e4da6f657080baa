//! Upstream outcome feed.

pub mod envelope;
mod http_feed;

pub use envelope::parse_page;
pub use http_feed::HttpFeed;
