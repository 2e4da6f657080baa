//! Raw outcome records and period-id arithmetic.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::constants::PERIOD_SENTINEL_SUFFIX;

/// One realized outcome of the upstream feed. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Opaque, ordered period token (usually a long decimal string).
    pub period_id: String,
    /// Raw numeric outcome, 0–9.
    pub numeric_value: i64,
    /// Raw color tag as delivered by the feed (e.g. "red,violet").
    pub color_tag: String,
}

impl Observation {
    pub fn new(
        period_id: impl Into<String>,
        numeric_value: i64,
        color_tag: impl Into<String>,
    ) -> Self {
        Self {
            period_id: period_id.into(),
            numeric_value,
            color_tag: color_tag.into(),
        }
    }
}

fn is_decimal(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Total order over period ids.
///
/// Decimal ids sort before every other id. Two decimal ids compare
/// numerically at arbitrary precision (leading zeros ignored, raw text as the
/// final tie-break). Two non-decimal ids compare as text.
pub fn compare_period_ids(a: &str, b: &str) -> Ordering {
    match (is_decimal(a), is_decimal(b)) {
        (true, true) => {
            let ta = a.trim_start_matches('0');
            let tb = b.trim_start_matches('0');
            ta.len()
                .cmp(&tb.len())
                .then_with(|| ta.cmp(tb))
                .then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Sort observations ascending by period id.
pub fn sort_observations(observations: &mut [Observation]) {
    observations.sort_by(|a, b| compare_period_ids(&a.period_id, &b.period_id));
}

/// The period id that follows `id`.
///
/// Decimal ids are incremented by one with carry, preserving width unless the
/// carry overflows (`"0999"` → `"1000"`, `"999"` → `"1000"`). Any other id gets
/// [`PERIOD_SENTINEL_SUFFIX`] appended instead.
pub fn successor_period_id(id: &str) -> String {
    if !is_decimal(id) {
        return format!("{id}{PERIOD_SENTINEL_SUFFIX}");
    }

    let mut digits: Vec<u8> = id.bytes().collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if !carry {
            break;
        }
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }
    // Only ASCII digits were written.
    String::from_utf8_lossy(&digits).into_owned()
}
