mod adjudicator;
mod feed;
mod store;

pub use adjudicator::{Adjudicator, NoOpAdjudicator, RuleSummary};
pub use feed::FeedSource;
pub use store::{IOutcomeStore, TrimReport};
