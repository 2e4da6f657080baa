//! Error hierarchy. Subsystem errors convert into [`AugurError`] via `#[from]`.

mod feed_error;
mod mining_error;
mod storage_error;

pub use feed_error::FeedError;
pub use mining_error::MiningError;
pub use storage_error::StorageError;

/// Top-level error type for every Augur crate.
#[derive(Debug, thiserror::Error)]
pub enum AugurError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("feed error: {0}")]
    FeedError(#[from] FeedError),

    #[error("mining error: {0}")]
    MiningError(#[from] MiningError),

    #[error("adjudicator error: {reason}")]
    AdjudicatorError { reason: String },

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("unknown mode: {name}")]
    UnknownMode { name: String },

    #[error("unknown label: {name}")]
    UnknownLabel { name: String },
}

/// Result alias used across the workspace.
pub type AugurResult<T> = Result<T, AugurError>;
