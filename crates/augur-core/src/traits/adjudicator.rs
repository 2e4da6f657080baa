use serde::{Deserialize, Serialize};

use crate::errors::AugurResult;
use crate::models::{Formula, Label, Mode};

/// Compact view of a ranked formula, sent to the adjudicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSummary {
    pub id: String,
    pub description: String,
    pub confidence: f64,
    pub support: u32,
}

impl From<&Formula> for RuleSummary {
    fn from(formula: &Formula) -> Self {
        Self {
            id: formula.id.clone(),
            description: formula.description.clone(),
            confidence: formula.confidence,
            support: formula.support,
        }
    }
}

/// Optional secondary predictor whose opinion may override the rule engine.
pub trait Adjudicator: Send + Sync {
    /// Returns `Ok(None)` when it has no opinion.
    fn predict(
        &self,
        mode: Mode,
        rules: &[RuleSummary],
        recent: &[Label],
    ) -> AugurResult<Option<Label>>;
}

/// Adjudicator that never has an opinion.
pub struct NoOpAdjudicator;

impl Adjudicator for NoOpAdjudicator {
    fn predict(
        &self,
        _mode: Mode,
        _rules: &[RuleSummary],
        _recent: &[Label],
    ) -> AugurResult<Option<Label>> {
        Ok(None)
    }
}
