use std::fmt;

use serde::{Deserialize, Serialize};

use super::mode::Mode;

/// Retrain policy state for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyState {
    NoActiveSet,
    Active,
    RetrainNeeded,
}

impl fmt::Display for PolicyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PolicyState::NoActiveSet => "NO_ACTIVE_SET",
            PolicyState::Active => "ACTIVE",
            PolicyState::RetrainNeeded => "RETRAIN_NEEDED",
        })
    }
}

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Completed,
    /// Upstream feed unreachable or malformed. Nothing was mined.
    UpstreamError { reason: String },
    /// An essential storage read or write failed.
    StorageError { reason: String },
    Failed { reason: String },
}

/// Per-mode engine state after a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeReport {
    pub mode: Mode,
    pub state: PolicyState,
    pub active_set_id: Option<String>,
    pub rule_count: usize,
    pub accuracy: f64,
    pub total_predictions: u32,
    pub consecutive_failures: u32,
    /// Number of retrains performed during this cycle.
    pub retrains: u32,
    pub resolved: usize,
    pub backfilled: usize,
    /// Period id forecast during this cycle, if a new forecast was made.
    pub forecast_period: Option<String>,
}

/// Structured summary returned to the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub success: bool,
    pub outcome: InvocationOutcome,
    pub engine_state: Vec<ModeReport>,
    /// Observations in the history the cycle ran over.
    pub records_processed: usize,
    /// Formulas across all active sets.
    pub active_rule_count: usize,
    /// Backfilled plus forecast records written.
    pub new_predictions: usize,
    pub resolved_count: usize,
    pub retrain_count: u32,
}

impl InvocationResult {
    /// A result for an invocation that aborted before any cycle ran.
    pub fn failed(outcome: InvocationOutcome) -> Self {
        Self {
            success: false,
            outcome,
            engine_state: Vec::new(),
            records_processed: 0,
            active_rule_count: 0,
            new_predictions: 0,
            resolved_count: 0,
            retrain_count: 0,
        }
    }

    pub fn completed(records_processed: usize, engine_state: Vec<ModeReport>) -> Self {
        let active_rule_count = engine_state.iter().map(|r| r.rule_count).sum();
        let resolved_count = engine_state.iter().map(|r| r.resolved).sum();
        let new_predictions = engine_state
            .iter()
            .map(|r| r.backfilled + usize::from(r.forecast_period.is_some()))
            .sum();
        let retrain_count = engine_state.iter().map(|r| r.retrains).sum();
        Self {
            success: true,
            outcome: InvocationOutcome::Completed,
            engine_state,
            records_processed,
            active_rule_count,
            new_predictions,
            resolved_count,
            retrain_count,
        }
    }
}
