use crate::errors::AugurResult;
use crate::models::Observation;

/// Pull-based source of recent outcomes.
pub trait FeedSource: Send + Sync {
    /// Fetch the most recent page. Errors abort the invocation.
    fn fetch(&self) -> AugurResult<Vec<Observation>>;
}
