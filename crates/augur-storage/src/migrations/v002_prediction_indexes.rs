//! v002: indexes for resolution and per-set attribution lookups.

use rusqlite::Connection;

use augur_core::errors::AugurResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AugurResult<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_predictions_unresolved
            ON predictions(mode) WHERE correct IS NULL;
        CREATE INDEX IF NOT EXISTS idx_predictions_set ON predictions(formula_set_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
