//! # augur-storage
//!
//! SQLite persistence behind [`IOutcomeStore`](augur_core::traits::IOutcomeStore).
//! One write connection serializes all writes; file-backed stores read
//! through a round-robin pool of read-only connections.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::SqliteStore;

use augur_core::errors::{AugurError, StorageError};

/// Wrap a SQLite failure message as an [`AugurError`].
pub(crate) fn to_storage_err(message: String) -> AugurError {
    AugurError::StorageError(StorageError::SqliteError { message })
}

/// A row that could not be decoded back into a domain value.
pub(crate) fn corrupt_row(table: &str, reason: impl Into<String>) -> AugurError {
    AugurError::StorageError(StorageError::CorruptRow {
        table: table.to_string(),
        reason: reason.into(),
    })
}
