//! Decoding of the upstream JSON page.
//!
//! Accepted shapes: a bare list of items, or `{ "data": { "list": [...] } }`.
//! Item fields accept aliases (`issueNumber` / `period`, `number`, `color`)
//! and numbers may arrive as integers or numeric strings. Any invalid item
//! rejects the whole page.

use std::collections::HashSet;

use serde::Deserialize;

use augur_core::constants::{MAX_NUMERIC_VALUE, MIN_NUMERIC_VALUE};
use augur_core::errors::{AugurResult, FeedError};
use augur_core::models::Observation;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    Bare(Vec<RawItem>),
    Wrapped { data: Data },
}

#[derive(Debug, Deserialize)]
struct Data {
    list: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Text(s) => s.trim().to_string(),
        }
    }

    fn to_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(alias = "issueNumber", alias = "period")]
    period_id: Scalar,
    #[serde(alias = "number")]
    numeric_value: Scalar,
    #[serde(alias = "color", default)]
    color_tag: Option<String>,
}

fn malformed(reason: impl Into<String>) -> FeedError {
    FeedError::Malformed {
        reason: reason.into(),
    }
}

/// Decode one page into observations, deduplicated by period (first wins).
pub fn parse_page(body: &str) -> AugurResult<Vec<Observation>> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| malformed(format!("unrecognized payload: {e}")))?;
    let items = match envelope {
        Envelope::Bare(items) => items,
        Envelope::Wrapped { data } => data.list,
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut observations = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let value = item
            .numeric_value
            .to_int()
            .ok_or_else(|| malformed(format!("item {index}: number is not an integer")))?;
        if !(MIN_NUMERIC_VALUE..=MAX_NUMERIC_VALUE).contains(&value) {
            return Err(malformed(format!("item {index}: number {value} out of range")).into());
        }
        let period_id = item.period_id.into_text();
        if period_id.is_empty() {
            return Err(malformed(format!("item {index}: empty period id")).into());
        }
        if !seen.insert(period_id.clone()) {
            continue;
        }
        observations.push(Observation::new(
            period_id,
            value,
            item.color_tag.unwrap_or_default(),
        ));
    }
    Ok(observations)
}
