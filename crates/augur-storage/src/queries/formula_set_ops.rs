use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

use augur_core::errors::AugurResult;
use augur_core::models::{Formula, FormulaSet, Mode, SetCounters};

use super::{format_timestamp, parse_timestamp};
use crate::{corrupt_row, to_storage_err};

const TABLE: &str = "formula_sets";

const COLUMNS: &str = "id, mode, formulas, total_predictions, correct_predictions,
    consecutive_failures, accuracy, is_active, mined_at, sequence_length, fingerprint";

struct RawSet {
    id: String,
    mode: String,
    formulas: String,
    total_predictions: u32,
    correct_predictions: u32,
    consecutive_failures: u32,
    accuracy: f64,
    is_active: bool,
    mined_at: String,
    sequence_length: i64,
    fingerprint: String,
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawSet> {
    Ok(RawSet {
        id: row.get(0)?,
        mode: row.get(1)?,
        formulas: row.get(2)?,
        total_predictions: row.get(3)?,
        correct_predictions: row.get(4)?,
        consecutive_failures: row.get(5)?,
        accuracy: row.get(6)?,
        is_active: row.get(7)?,
        mined_at: row.get(8)?,
        sequence_length: row.get(9)?,
        fingerprint: row.get(10)?,
    })
}

fn decode(raw: RawSet) -> AugurResult<FormulaSet> {
    let mode: Mode = raw
        .mode
        .parse()
        .map_err(|_| corrupt_row(TABLE, format!("unknown mode {:?}", raw.mode)))?;
    let formulas: Vec<Formula> = serde_json::from_str(&raw.formulas)
        .map_err(|e| corrupt_row(TABLE, format!("formulas of {}: {e}", raw.id)))?;
    Ok(FormulaSet {
        mode,
        formulas,
        counters: SetCounters {
            total_predictions: raw.total_predictions,
            correct_predictions: raw.correct_predictions,
            consecutive_failures: raw.consecutive_failures,
            accuracy: raw.accuracy,
        },
        is_active: raw.is_active,
        mined_at: parse_timestamp(TABLE, &raw.mined_at)?,
        sequence_length: usize::try_from(raw.sequence_length).unwrap_or(0),
        fingerprint: raw.fingerprint,
        id: raw.id,
    })
}

pub fn active_formula_set(conn: &Connection, mode: Mode) -> AugurResult<Option<FormulaSet>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM formula_sets WHERE mode = ?1 AND is_active = 1"),
            params![mode.as_str()],
            read_raw,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(decode).transpose()
}

/// Newest first.
pub fn formula_sets(conn: &Connection, mode: Mode, limit: usize) -> AugurResult<Vec<FormulaSet>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM formula_sets WHERE mode = ?1
             ORDER BY mined_at DESC, rowid DESC LIMIT ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt
        .query_map(params![mode.as_str(), limit], read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let raws = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raws.into_iter().map(decode).collect()
}

/// Deactivate the mode's current set and store `set` as active, in one
/// immediate transaction. Re-activating an already stored id keeps its row
/// and resets nothing but the flag.
pub fn activate_formula_set(conn: &Connection, set: &FormulaSet) -> AugurResult<()> {
    let formulas = serde_json::to_string(&set.formulas)?;
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("activate begin: {e}")))?;

    tx.execute(
        "UPDATE formula_sets SET is_active = 0 WHERE mode = ?1 AND is_active = 1 AND id != ?2",
        params![set.mode.as_str(), set.id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.execute(
        "INSERT INTO formula_sets (id, mode, formulas, total_predictions, correct_predictions,
             consecutive_failures, accuracy, is_active, mined_at, sequence_length, fingerprint)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?9, ?10)
         ON CONFLICT(id) DO UPDATE SET is_active = 1",
        params![
            set.id,
            set.mode.as_str(),
            formulas,
            set.counters.total_predictions,
            set.counters.correct_predictions,
            set.counters.consecutive_failures,
            set.counters.accuracy,
            format_timestamp(&set.mined_at),
            i64::try_from(set.sequence_length).unwrap_or(i64::MAX),
            set.fingerprint,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("activate commit: {e}")))
}

/// Re-read the set's counters, fold in one outcome and write them back in
/// one immediate transaction, so overlapping invocations never lose an update.
/// Returns `None` when no set has this id.
pub fn record_set_outcome(
    conn: &Connection,
    set_id: &str,
    correct: bool,
) -> AugurResult<Option<SetCounters>> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("record outcome begin: {e}")))?;

    let current = tx
        .query_row(
            "SELECT total_predictions, correct_predictions, consecutive_failures, accuracy
             FROM formula_sets WHERE id = ?1",
            params![set_id],
            |row| {
                Ok(SetCounters {
                    total_predictions: row.get(0)?,
                    correct_predictions: row.get(1)?,
                    consecutive_failures: row.get(2)?,
                    accuracy: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some(mut counters) = current else {
        tx.commit()
            .map_err(|e| to_storage_err(format!("record outcome commit: {e}")))?;
        return Ok(None);
    };
    counters.record(correct);

    tx.execute(
        "UPDATE formula_sets SET total_predictions = ?2, correct_predictions = ?3,
             consecutive_failures = ?4, accuracy = ?5
         WHERE id = ?1",
        params![
            set_id,
            counters.total_predictions,
            counters.correct_predictions,
            counters.consecutive_failures,
            counters.accuracy,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("record outcome commit: {e}")))?;
    Ok(Some(counters))
}
