//! Optional LLM adjudicator over a chat-completions style endpoint.

mod http_adjudicator;
pub mod prompt;

pub use http_adjudicator::HttpAdjudicator;
