use rusqlite::{params, Connection};

use augur_core::errors::AugurResult;
use augur_core::models::{sort_observations, Observation};

use crate::to_storage_err;

/// `INSERT OR IGNORE` every observation in one transaction.
pub fn insert_observations(conn: &Connection, observations: &[Observation]) -> AugurResult<usize> {
    if observations.is_empty() {
        return Ok(0);
    }
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut inserted = 0;
    {
        let mut stmt = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO observations (period_id, numeric_value, color_tag)
                 VALUES (?1, ?2, ?3)",
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        for obs in observations {
            inserted += stmt
                .execute(params![obs.period_id, obs.numeric_value, obs.color_tag])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(inserted)
}

/// Every stored observation, ascending by period.
pub fn all_observations(conn: &Connection) -> AugurResult<Vec<Observation>> {
    let mut stmt = conn
        .prepare_cached("SELECT period_id, numeric_value, color_tag FROM observations")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Observation {
                period_id: row.get(0)?,
                numeric_value: row.get(1)?,
                color_tag: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut observations = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    sort_observations(&mut observations);
    Ok(observations)
}

pub fn count_observations(conn: &Connection) -> AugurResult<usize> {
    conn.query_row("SELECT COUNT(*) FROM observations", [], |row| {
        row.get::<_, i64>(0)
    })
    .map(|n| n as usize)
    .map_err(|e| to_storage_err(e.to_string()))
}
