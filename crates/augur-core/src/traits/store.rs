use std::collections::BTreeSet;

use crate::config::RetentionConfig;
use crate::errors::AugurResult;
use crate::models::{FormulaSet, Mode, Observation, PredictionRecord, SetCounters};

/// Rows removed by a retention pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimReport {
    pub observations: usize,
    pub predictions: usize,
    pub formula_sets: usize,
}

impl TrimReport {
    pub fn total(&self) -> usize {
        self.observations + self.predictions + self.formula_sets
    }
}

/// Persistent store for observations, formula sets, and prediction records.
///
/// Every write is idempotent: re-submitting an existing key is a no-op, and
/// activating a formula set deactivates the previous one atomically.
pub trait IOutcomeStore: Send + Sync {
    // --- Observations ---
    /// Insert observations, ignoring periods already stored. Returns rows added.
    fn insert_observations(&self, observations: &[Observation]) -> AugurResult<usize>;
    /// Full retained history, ascending by period.
    fn all_observations(&self) -> AugurResult<Vec<Observation>>;

    // --- Formula sets ---
    fn active_formula_set(&self, mode: Mode) -> AugurResult<Option<FormulaSet>>;
    /// Store `set` as the only active set for its mode.
    fn activate_formula_set(&self, set: &FormulaSet) -> AugurResult<()>;
    /// Fold one resolved forecast into the set's stored counters as a single
    /// read-modify-write. Returns the new counters, or `None` for an unknown id.
    fn record_set_outcome(&self, set_id: &str, correct: bool) -> AugurResult<Option<SetCounters>>;
    /// Most recent sets for a mode, newest first.
    fn formula_sets(&self, mode: Mode, limit: usize) -> AugurResult<Vec<FormulaSet>>;

    // --- Predictions ---
    /// Insert unless `(period_id, mode)` exists. Returns whether a row was added.
    fn insert_prediction(&self, record: &PredictionRecord) -> AugurResult<bool>;
    fn get_prediction(&self, period_id: &str, mode: Mode) -> AugurResult<Option<PredictionRecord>>;
    fn unresolved_predictions(&self, mode: Mode) -> AugurResult<Vec<PredictionRecord>>;
    fn predicted_periods(&self, mode: Mode) -> AugurResult<BTreeSet<String>>;
    /// Set `correct` if still unresolved. Returns whether the row changed.
    fn resolve_prediction(&self, period_id: &str, mode: Mode, correct: bool) -> AugurResult<bool>;

    // --- Maintenance ---
    fn trim(&self, retention: &RetentionConfig) -> AugurResult<TrimReport>;
}
