//! Versioned schema migrations, applied in order on open.

mod v001_initial_schema;
mod v002_prediction_indexes;

use rusqlite::{params, Connection};
use tracing::{debug, info};

use augur_core::errors::{AugurResult, StorageError};

use crate::to_storage_err;

type Migration = fn(&Connection) -> AugurResult<()>;

const MIGRATIONS: [(u32, &str, Migration); 2] = [
    (1, "initial_schema", v001_initial_schema::migrate),
    (2, "prediction_indexes", v002_prediction_indexes::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Highest applied version, 0 on a fresh database.
pub fn current_version(conn: &Connection) -> AugurResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every pending migration, each in its own transaction.
pub fn run_migrations(conn: &Connection) -> AugurResult<u32> {
    let current = current_version(conn)?;
    let mut applied = 0;
    for (version, name, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        migrate(&tx).map_err(|e| StorageError::MigrationFailed {
            version,
            reason: e.to_string(),
        })?;
        tx.execute(
            "INSERT INTO schema_version (version, name) VALUES (?1, ?2)",
            params![version, name],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        debug!(version, name, "migration applied");
        applied += 1;
    }
    if applied > 0 {
        info!(applied, version = LATEST_VERSION, "schema migrated");
    }
    Ok(applied)
}
