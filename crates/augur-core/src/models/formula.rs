//! Mined rules ("formulas") and the per-mode sets that hold them.
//!
//! A rule's condition and prediction are closed variants with typed
//! parameters, so applying a rule never re-parses its description.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mode::{Label, Mode};
use crate::errors::AugurResult;

/// The rule family a formula was mined by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    StreakReversal,
    NGram,
    FrequencyImbalance,
    Alternation,
    Transition,
    NumberCluster,
    RepeatedBlock,
}

impl RuleFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleFamily::StreakReversal => "streak_reversal",
            RuleFamily::NGram => "ngram",
            RuleFamily::FrequencyImbalance => "frequency_imbalance",
            RuleFamily::Alternation => "alternation",
            RuleFamily::Transition => "transition",
            RuleFamily::NumberCluster => "number_cluster",
            RuleFamily::RepeatedBlock => "repeated_block",
        }
    }

    /// Whether this family is held to the relaxed support floor.
    pub fn uses_relaxed_support(&self) -> bool {
        matches!(self, RuleFamily::RepeatedBlock)
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the numeric domain a moving average must sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageBand {
    /// Average ≤ 3.
    Low,
    /// Average ≥ 6.
    High,
    /// Either extreme.
    Either,
}

impl AverageBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            AverageBand::Low => "low",
            AverageBand::High => "high",
            AverageBand::Either => "either",
        }
    }
}

/// Structured IF-part of a formula. Evaluated against the tail of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// The last `length` labels all equal `label`.
    Streak { length: usize, label: Label },
    /// The last `pattern.len()` labels equal `pattern` exactly.
    Pattern { pattern: Vec<Label> },
    /// `label` fills at least `threshold_pct`% of the last `window` labels.
    Imbalance {
        window: usize,
        threshold_pct: u8,
        label: Label,
    },
    /// The last `length` labels strictly alternate.
    Alternating { length: usize },
    /// The previous label equals `label`.
    PreviousIs { label: Label },
    /// The moving average of the last `window` raw numbers falls in `band`.
    AverageBand { window: usize, band: AverageBand },
    /// `block` occurs twice back to back immediately before the current position.
    RepeatedBlock { block: Vec<Label> },
}

fn join_labels(labels: &[Label]) -> String {
    labels
        .iter()
        .map(Label::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

impl Condition {
    pub fn family(&self) -> RuleFamily {
        match self {
            Condition::Streak { .. } => RuleFamily::StreakReversal,
            Condition::Pattern { .. } => RuleFamily::NGram,
            Condition::Imbalance { .. } => RuleFamily::FrequencyImbalance,
            Condition::Alternating { .. } => RuleFamily::Alternation,
            Condition::PreviousIs { .. } => RuleFamily::Transition,
            Condition::AverageBand { .. } => RuleFamily::NumberCluster,
            Condition::RepeatedBlock { .. } => RuleFamily::RepeatedBlock,
        }
    }

    /// Stable, compact key. Used to build formula ids.
    pub fn key(&self) -> String {
        match self {
            Condition::Streak { length, label } => format!("streak:{length}:{label}"),
            Condition::Pattern { pattern } => format!("ngram:{}", join_labels(pattern)),
            Condition::Imbalance {
                window,
                threshold_pct,
                label,
            } => format!("imbalance:{window}:{threshold_pct}:{label}"),
            Condition::Alternating { length } => format!("alternation:{length}"),
            Condition::PreviousIs { label } => format!("transition:{label}"),
            Condition::AverageBand { window, band } => {
                format!("cluster:{window}:{}", band.as_str())
            }
            Condition::RepeatedBlock { block } => format!("repeat:{}", join_labels(block)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Condition::Streak { length, label } => {
                format!("last {length} outcomes all {label}")
            }
            Condition::Pattern { pattern } => {
                format!("last {} outcomes were {}", pattern.len(), join_labels(pattern))
            }
            Condition::Imbalance {
                window,
                threshold_pct,
                label,
            } => format!("{label} fills at least {threshold_pct}% of the last {window} outcomes"),
            Condition::Alternating { length } => {
                format!("last {length} outcomes strictly alternate")
            }
            Condition::PreviousIs { label } => format!("previous outcome was {label}"),
            Condition::AverageBand { window, band } => {
                let range = match band {
                    AverageBand::Low => "<= 3",
                    AverageBand::High => ">= 6",
                    AverageBand::Either => "<= 3 or >= 6",
                };
                format!("average of the last {window} numbers is {range}")
            }
            Condition::RepeatedBlock { block } => {
                format!("block {} repeated twice", join_labels(block))
            }
        }
    }
}

/// Structured THEN-part of a formula. Symbolic variants are resolved against
/// the tail at application time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum Prediction {
    Fixed(Label),
    /// The label opposite to the last observed one.
    ContinueAlternation,
    /// LOW when the moving average sits at the low extreme, HIGH at the high one.
    FollowExtreme,
}

impl Prediction {
    pub fn key(&self) -> String {
        match self {
            Prediction::Fixed(label) => label.as_str().to_string(),
            Prediction::ContinueAlternation => "alternate".to_string(),
            Prediction::FollowExtreme => "follow_extreme".to_string(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Prediction::Fixed(label) => format!("predict {label}"),
            Prediction::ContinueAlternation => "continue alternating".to_string(),
            Prediction::FollowExtreme => "follow the observed extreme".to_string(),
        }
    }
}

/// A mined IF-THEN rule with its measured reliability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub id: String,
    pub family: RuleFamily,
    pub condition: Condition,
    pub prediction: Prediction,
    /// correct_matches / total_matches over the mined window, in [0, 1].
    pub confidence: f64,
    /// total_matches over the mined window.
    pub support: u32,
    pub description: String,
}

impl Formula {
    /// Build a formula from raw tallies. Returns `None` when the condition
    /// never matched, so no formula carries an undefined confidence.
    pub fn from_tally(
        condition: Condition,
        prediction: Prediction,
        correct: u32,
        total: u32,
    ) -> Option<Self> {
        if total == 0 {
            return None;
        }
        let confidence = f64::from(correct.min(total)) / f64::from(total);
        Some(Self {
            id: format!("{}->{}", condition.key(), prediction.key()),
            family: condition.family(),
            description: format!("IF {} THEN {}", condition.describe(), prediction.describe()),
            condition,
            prediction,
            confidence,
            support: total,
        })
    }

    /// Ranking score: confidence × support.
    pub fn score(&self) -> f64 {
        self.confidence * f64::from(self.support)
    }
}

/// Live performance counters of a formula set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SetCounters {
    pub total_predictions: u32,
    pub correct_predictions: u32,
    pub consecutive_failures: u32,
    pub accuracy: f64,
}

impl SetCounters {
    /// Fold one resolved forecast into the counters.
    pub fn record(&mut self, correct: bool) {
        self.total_predictions += 1;
        if correct {
            self.correct_predictions += 1;
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures += 1;
        }
        self.accuracy = f64::from(self.correct_predictions) / f64::from(self.total_predictions);
    }
}

/// A ranked list of formulas for one mode plus its live counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaSet {
    pub id: String,
    pub mode: Mode,
    pub formulas: Vec<Formula>,
    #[serde(flatten)]
    pub counters: SetCounters,
    pub is_active: bool,
    pub mined_at: DateTime<Utc>,
    /// Length of the sequence the set was mined from.
    pub sequence_length: usize,
    /// blake3 hex digest of the ranked formula list.
    pub fingerprint: String,
}

impl FormulaSet {
    /// Wrap freshly mined formulas. Counters start at zero; the set is
    /// inactive until the store activates it.
    pub fn new(
        id: impl Into<String>,
        mode: Mode,
        formulas: Vec<Formula>,
        sequence_length: usize,
        mined_at: DateTime<Utc>,
    ) -> AugurResult<Self> {
        let fingerprint = Self::fingerprint_of(&formulas)?;
        Ok(Self {
            id: id.into(),
            mode,
            formulas,
            counters: SetCounters::default(),
            is_active: false,
            mined_at,
            sequence_length,
            fingerprint,
        })
    }

    pub fn fingerprint_of(formulas: &[Formula]) -> AugurResult<String> {
        let bytes = serde_json::to_vec(formulas)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}
