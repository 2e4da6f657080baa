use std::collections::BTreeSet;

use rusqlite::{params, Connection, OptionalExtension, Row};

use augur_core::errors::AugurResult;
use augur_core::models::{Label, Mode, PredictionOrigin, PredictionRecord};

use super::{format_timestamp, parse_timestamp};
use crate::{corrupt_row, to_storage_err};

const TABLE: &str = "predictions";

const COLUMNS: &str =
    "period_id, mode, predicted, correct, applied_rule, formula_set_id, origin, created_at";

struct RawPrediction {
    period_id: String,
    mode: String,
    predicted: String,
    correct: Option<bool>,
    applied_rule: Option<String>,
    formula_set_id: Option<String>,
    origin: String,
    created_at: String,
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawPrediction> {
    Ok(RawPrediction {
        period_id: row.get(0)?,
        mode: row.get(1)?,
        predicted: row.get(2)?,
        correct: row.get(3)?,
        applied_rule: row.get(4)?,
        formula_set_id: row.get(5)?,
        origin: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn decode(raw: RawPrediction) -> AugurResult<PredictionRecord> {
    let mode: Mode = raw
        .mode
        .parse()
        .map_err(|_| corrupt_row(TABLE, format!("unknown mode {:?}", raw.mode)))?;
    let predicted: Label = raw
        .predicted
        .parse()
        .map_err(|_| corrupt_row(TABLE, format!("unknown label {:?}", raw.predicted)))?;
    let origin: PredictionOrigin = raw
        .origin
        .parse()
        .map_err(|_| corrupt_row(TABLE, format!("unknown origin {:?}", raw.origin)))?;
    Ok(PredictionRecord {
        period_id: raw.period_id,
        mode,
        predicted,
        correct: raw.correct,
        applied_rule: raw.applied_rule,
        formula_set_id: raw.formula_set_id,
        origin,
        created_at: parse_timestamp(TABLE, &raw.created_at)?,
    })
}

/// `INSERT OR IGNORE` on `(period_id, mode)`.
pub fn insert_prediction(conn: &Connection, record: &PredictionRecord) -> AugurResult<bool> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO predictions
                 (period_id, mode, predicted, correct, applied_rule, formula_set_id, origin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.period_id,
                record.mode.as_str(),
                record.predicted.as_str(),
                record.correct,
                record.applied_rule,
                record.formula_set_id,
                record.origin.as_str(),
                format_timestamp(&record.created_at),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(inserted > 0)
}

pub fn get_prediction(
    conn: &Connection,
    period_id: &str,
    mode: Mode,
) -> AugurResult<Option<PredictionRecord>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM predictions WHERE period_id = ?1 AND mode = ?2"),
            params![period_id, mode.as_str()],
            read_raw,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(decode).transpose()
}

pub fn unresolved_predictions(conn: &Connection, mode: Mode) -> AugurResult<Vec<PredictionRecord>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM predictions WHERE mode = ?1 AND correct IS NULL"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![mode.as_str()], read_raw)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let raws = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raws.into_iter().map(decode).collect()
}

pub fn predicted_periods(conn: &Connection, mode: Mode) -> AugurResult<BTreeSet<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT period_id FROM predictions WHERE mode = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![mode.as_str()], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<BTreeSet<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Resolve once: rows that already carry a verdict are left alone.
pub fn resolve_prediction(
    conn: &Connection,
    period_id: &str,
    mode: Mode,
    correct: bool,
) -> AugurResult<bool> {
    let changed = conn
        .execute(
            "UPDATE predictions SET correct = ?3
             WHERE period_id = ?1 AND mode = ?2 AND correct IS NULL",
            params![period_id, mode.as_str(), correct],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(changed > 0)
}
