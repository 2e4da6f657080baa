//! Plain functions over a borrowed connection. The engine decides which
//! connection (writer or reader) each one runs on.

pub mod formula_set_ops;
pub mod observation_ops;
pub mod prediction_ops;
pub mod retention_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use augur_core::errors::AugurResult;

use crate::corrupt_row;

pub(crate) fn parse_timestamp(table: &str, raw: &str) -> AugurResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| corrupt_row(table, format!("bad timestamp {raw:?}: {e}")))
}

/// Fixed-width UTC timestamps so text ordering matches time ordering.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
