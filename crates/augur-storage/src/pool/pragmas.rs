//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use augur_core::errors::AugurResult;

use crate::to_storage_err;

/// WAL, NORMAL sync, configurable busy timeout.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> AugurResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Read-side pragmas. Skips journal and sync settings owned by the writer.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> AugurResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA temp_store = MEMORY;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn verify_wal_mode(conn: &Connection) -> AugurResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
