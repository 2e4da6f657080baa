use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mode::{Label, Mode};
use crate::errors::AugurError;

/// Where a stored prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionOrigin {
    /// Causal replay over history with the reversal heuristic.
    Backfill,
    /// Live forecast from the rule applier.
    Engine,
    /// Live forecast overridden by the external adjudicator.
    Adjudicator,
}

impl PredictionOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionOrigin::Backfill => "backfill",
            PredictionOrigin::Engine => "engine",
            PredictionOrigin::Adjudicator => "adjudicator",
        }
    }
}

impl fmt::Display for PredictionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionOrigin {
    type Err = AugurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backfill" => Ok(PredictionOrigin::Backfill),
            "engine" => Ok(PredictionOrigin::Engine),
            "adjudicator" => Ok(PredictionOrigin::Adjudicator),
            other => Err(AugurError::ConfigError {
                reason: format!("unknown prediction origin: {other}"),
            }),
        }
    }
}

/// A forecast for one `(period_id, mode)`. Unique per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub period_id: String,
    pub mode: Mode,
    pub predicted: Label,
    /// `None` until the matching observation arrives; resolved exactly once.
    pub correct: Option<bool>,
    /// Formula that fired (or agreed with the adjudicator), if any.
    pub applied_rule: Option<String>,
    /// Formula set that was active when the forecast was made.
    pub formula_set_id: Option<String>,
    pub origin: PredictionOrigin,
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn is_resolved(&self) -> bool {
        self.correct.is_some()
    }

    /// Whether the forecast matches the realized label.
    pub fn matches(&self, actual: Label) -> bool {
        self.predicted == actual
    }
}
