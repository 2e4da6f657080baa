//! Single write connection behind `tokio::sync::Mutex`.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use augur_core::errors::AugurResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> AugurResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> AugurResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock from async code.
    pub async fn with_conn<F, T>(&self, f: F) -> AugurResult<T>
    where
        F: FnOnce(&Connection) -> AugurResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }

    /// Acquire the write lock from synchronous code. Must not be called
    /// from inside an async runtime worker.
    pub fn with_conn_sync<F, T>(&self, f: F) -> AugurResult<T>
    where
        F: FnOnce(&Connection) -> AugurResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}
