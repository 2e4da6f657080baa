//! v001: observations, formula_sets, predictions.

use rusqlite::Connection;

use augur_core::errors::AugurResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AugurResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS observations (
            period_id      TEXT PRIMARY KEY,
            numeric_value  INTEGER NOT NULL CHECK (numeric_value BETWEEN 0 AND 9),
            color_tag      TEXT NOT NULL,
            ingested_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS formula_sets (
            id                    TEXT PRIMARY KEY,
            mode                  TEXT NOT NULL,
            formulas              TEXT NOT NULL,
            total_predictions     INTEGER NOT NULL DEFAULT 0,
            correct_predictions   INTEGER NOT NULL DEFAULT 0,
            consecutive_failures  INTEGER NOT NULL DEFAULT 0,
            accuracy              REAL NOT NULL DEFAULT 0.0,
            is_active             INTEGER NOT NULL DEFAULT 0,
            mined_at              TEXT NOT NULL,
            sequence_length       INTEGER NOT NULL,
            fingerprint           TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_formula_sets_one_active
            ON formula_sets(mode) WHERE is_active = 1;
        CREATE INDEX IF NOT EXISTS idx_formula_sets_mode ON formula_sets(mode, mined_at);

        CREATE TABLE IF NOT EXISTS predictions (
            period_id       TEXT NOT NULL,
            mode            TEXT NOT NULL,
            predicted       TEXT NOT NULL,
            correct         INTEGER,
            applied_rule    TEXT,
            formula_set_id  TEXT,
            origin          TEXT NOT NULL,
            created_at      TEXT NOT NULL,
            PRIMARY KEY (period_id, mode)
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
