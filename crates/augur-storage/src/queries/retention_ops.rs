//! Row-count retention. Period ids are ordered with the domain comparator,
//! not SQL text ordering, so candidates are selected in Rust.

use rusqlite::{params, Connection, ToSql, Transaction, TransactionBehavior};

use augur_core::config::RetentionConfig;
use augur_core::errors::AugurResult;
use augur_core::models::{compare_period_ids, Mode};
use augur_core::traits::TrimReport;

use crate::to_storage_err;

fn string_column(conn: &Connection, sql: &str, args: &[&dyn ToSql]) -> AugurResult<Vec<String>> {
    let mut stmt = conn
        .prepare_cached(sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(args, |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Everything but the newest `keep` periods, oldest first.
fn oldest_beyond(mut periods: Vec<String>, keep: usize) -> Vec<String> {
    if periods.len() <= keep {
        return Vec::new();
    }
    periods.sort_by(|a, b| compare_period_ids(a, b));
    let excess = periods.len() - keep;
    periods.truncate(excess);
    periods
}

pub fn trim(conn: &Connection, retention: &RetentionConfig) -> AugurResult<TrimReport> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("trim begin: {e}")))?;
    let mut report = TrimReport::default();

    let observations = string_column(&tx, "SELECT period_id FROM observations", &[])?;
    for period in oldest_beyond(observations, retention.max_observations) {
        report.observations += tx
            .execute("DELETE FROM observations WHERE period_id = ?1", params![period])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }

    for mode in Mode::ALL {
        let periods = string_column(
            &tx,
            "SELECT period_id FROM predictions WHERE mode = ?1",
            &[&mode.as_str()],
        )?;
        for period in oldest_beyond(periods, retention.max_predictions_per_mode) {
            report.predictions += tx
                .execute(
                    "DELETE FROM predictions WHERE period_id = ?1 AND mode = ?2",
                    params![period, mode.as_str()],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
        }

        let inactive = string_column(
            &tx,
            "SELECT id FROM formula_sets WHERE mode = ?1 AND is_active = 0
             ORDER BY mined_at DESC, rowid DESC",
            &[&mode.as_str()],
        )?;
        for id in inactive.iter().skip(retention.max_inactive_sets_per_mode) {
            report.formula_sets += tx
                .execute("DELETE FROM formula_sets WHERE id = ?1", params![id])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("trim commit: {e}")))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    #[test]
    fn oldest_beyond_uses_numeric_period_order() {
        let periods = vec!["100".to_string(), "99".to_string(), "101".to_string()];
        assert_eq!(oldest_beyond(periods.clone(), 2), vec!["99".to_string()]);
        assert!(oldest_beyond(periods, 3).is_empty());
    }

    #[test]
    fn keep_zero_drops_everything() {
        let periods = vec!["2".to_string(), "1".to_string()];
        let dropped = oldest_beyond(periods, 0);
        assert_eq!(dropped.len(), 2);
        assert_eq!(dropped[0].cmp(&dropped[1]), Ordering::Less);
    }
}
