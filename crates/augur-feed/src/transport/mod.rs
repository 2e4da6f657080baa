//! Blocking HTTP transport with retry and exponential backoff.

mod http_client;

pub use http_client::{HttpClient, HttpClientConfig};
