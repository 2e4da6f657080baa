//! RuleMiner — scans the full history of one mode and produces a ranked,
//! size-capped list of formulas.
//!
//! Families run in a fixed order (streak, n-gram, imbalance, alternation,
//! transition, cluster, repeat) and each emits candidates in discovery order.
//! Survivors are stable-sorted by `confidence × support`, so equal scores keep
//! that generation order and re-mining the same history is bit-identical.

pub mod families;
pub mod tally;

use augur_core::config::MiningConfig;
use augur_core::errors::AugurResult;
use augur_core::models::{Formula, FormulaSet, Mode, RuleFamily};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::features::FeatureSequence;

/// Guards the support-floor ceiling against float noise (0.03 × 100 = 3.0000000000000004).
const SUPPORT_EPSILON: f64 = 1e-9;

/// Guards the confidence comparison against float noise.
const CONFIDENCE_EPSILON: f64 = 1e-12;

/// Rule miner configured with thresholds from [`MiningConfig`].
#[derive(Debug, Clone)]
pub struct RuleMiner {
    config: MiningConfig,
}

impl RuleMiner {
    pub fn new(config: MiningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// `ceil(min_support_ratio × sequence_length)`.
    pub fn support_floor(&self, sequence_length: usize) -> u32 {
        let raw = self.config.min_support_ratio * sequence_length as f64 - SUPPORT_EPSILON;
        raw.ceil().max(0.0) as u32
    }

    /// Half the regular floor, rounded up, never below one.
    pub fn relaxed_support_floor(&self, sequence_length: usize) -> u32 {
        self.support_floor(sequence_length).div_ceil(2).max(1)
    }

    fn survives(&self, formula: &Formula, floor: u32, relaxed_floor: u32) -> bool {
        let required = if formula.family.uses_relaxed_support() {
            relaxed_floor
        } else {
            floor
        };
        formula.support >= required
            && formula.confidence + CONFIDENCE_EPSILON >= self.config.min_confidence
    }

    /// Raw candidates from every family that applies, in generation order.
    pub fn candidates(&self, seq: &FeatureSequence) -> Vec<Formula> {
        let mut all = Vec::new();
        all.extend(families::streak::candidates(seq));
        all.extend(families::ngram::candidates(seq));
        all.extend(families::imbalance::candidates(seq));
        all.extend(families::alternation::candidates(seq));
        all.extend(families::transition::candidates(seq));
        if seq.mode == Mode::Size && seq.len() >= self.config.cluster_min_length {
            all.extend(families::cluster::candidates(seq));
        }
        all.extend(families::repeat::candidates(seq));
        all
    }

    /// Mine, filter, rank, and truncate. Sequences shorter than
    /// `min_sequence_length` yield no formulas.
    pub fn mine(&self, seq: &FeatureSequence) -> Vec<Formula> {
        let n = seq.len();
        if n < self.config.min_sequence_length {
            debug!(
                mode = %seq.mode,
                length = n,
                min = self.config.min_sequence_length,
                "sequence too short to mine"
            );
            return Vec::new();
        }

        let floor = self.support_floor(n);
        let relaxed_floor = self.relaxed_support_floor(n);
        let candidates = self.candidates(seq);
        let candidate_count = candidates.len();

        let mut ranked: Vec<Formula> = candidates
            .into_iter()
            .filter(|f| self.survives(f, floor, relaxed_floor))
            .collect();
        let surviving = ranked.len();

        // Stable: equal scores keep generation order.
        ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
        ranked.truncate(self.config.max_formulas);

        debug!(
            mode = %seq.mode,
            length = n,
            support_floor = floor,
            candidates = candidate_count,
            surviving = surviving,
            retained = ranked.len(),
            "rule mining complete"
        );
        ranked
    }

    /// Mine and wrap the result in an inactive [`FormulaSet`] with zero counters.
    pub fn mine_set(
        &self,
        seq: &FeatureSequence,
        id: impl Into<String>,
        mined_at: DateTime<Utc>,
    ) -> AugurResult<FormulaSet> {
        let formulas = self.mine(seq);
        FormulaSet::new(id, seq.mode, formulas, seq.len(), mined_at)
    }

    /// Count of retained formulas per family, for reporting.
    pub fn family_breakdown(formulas: &[Formula]) -> Vec<(RuleFamily, usize)> {
        let mut breakdown: Vec<(RuleFamily, usize)> = Vec::new();
        for formula in formulas {
            match breakdown.iter_mut().find(|(family, _)| *family == formula.family) {
                Some((_, count)) => *count += 1,
                None => breakdown.push((formula.family, 1)),
            }
        }
        breakdown
    }
}

impl Default for RuleMiner {
    fn default() -> Self {
        Self::new(MiningConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_core::models::{Condition, Label, Prediction};

    fn seq(mode: Mode, labels: Vec<Label>) -> FeatureSequence {
        let numbers = labels
            .iter()
            .map(|l| if *l == Label::Low { 2 } else { 7 })
            .collect();
        FeatureSequence::new(mode, labels, numbers).unwrap()
    }

    #[test]
    fn support_floor_rounds_up() {
        let miner = RuleMiner::default();
        assert_eq!(miner.support_floor(10), 1);
        assert_eq!(miner.support_floor(33), 1);
        assert_eq!(miner.support_floor(34), 2);
        assert_eq!(miner.support_floor(100), 3);
        assert_eq!(miner.support_floor(200), 6);
        assert_eq!(miner.relaxed_support_floor(100), 2);
        assert_eq!(miner.relaxed_support_floor(200), 3);
        assert_eq!(miner.relaxed_support_floor(10), 1);
    }

    #[test]
    fn short_sequences_mine_nothing() {
        let miner = RuleMiner::default();
        let s = seq(Mode::Color, vec![Label::Red; 9]);
        assert!(miner.mine(&s).is_empty());
    }

    #[test]
    fn cluster_family_is_size_only() {
        let miner = RuleMiner::default();
        let labels: Vec<Label> = (0..30)
            .map(|i| if i % 3 == 0 { Label::Red } else { Label::Green })
            .collect();
        let color = FeatureSequence::new(Mode::Color, labels, vec![1; 30]).unwrap();
        assert!(miner
            .candidates(&color)
            .iter()
            .all(|f| f.family != RuleFamily::NumberCluster));

        let size_labels: Vec<Label> = (0..30)
            .map(|i| if i % 3 == 0 { Label::High } else { Label::Low })
            .collect();
        let size = FeatureSequence::new(Mode::Size, size_labels, vec![1; 30]).unwrap();
        assert!(miner
            .candidates(&size)
            .iter()
            .any(|f| f.family == RuleFamily::NumberCluster));
    }

    #[test]
    fn cluster_family_needs_twenty_observations() {
        let miner = RuleMiner::default();
        let labels = vec![Label::Low; 19];
        let size = FeatureSequence::new(Mode::Size, labels, vec![1; 19]).unwrap();
        assert!(miner
            .candidates(&size)
            .iter()
            .all(|f| f.family != RuleFamily::NumberCluster));
    }

    #[test]
    fn ranking_is_by_score_and_capped() {
        let miner = RuleMiner::default();
        let labels: Vec<Label> = (0..120)
            .map(|i| match i % 7 {
                0 | 1 | 4 => Label::Red,
                _ => Label::Green,
            })
            .collect();
        let s = seq(Mode::Color, labels);
        let formulas = miner.mine(&s);
        assert!(!formulas.is_empty());
        assert!(formulas.len() <= 30);
        for pair in formulas.windows(2) {
            assert!(pair[0].score() >= pair[1].score());
        }
    }

    #[test]
    fn low_confidence_candidates_are_dropped() {
        let miner = RuleMiner::default();
        // Perfect alternation: transition rules are certain, streak rules never match.
        let labels: Vec<Label> = (0..20)
            .map(|i| if i % 2 == 0 { Label::Red } else { Label::Green })
            .collect();
        let formulas = miner.mine(&seq(Mode::Color, labels));
        assert!(formulas.iter().all(|f| f.confidence >= 0.55));
        assert!(formulas
            .iter()
            .all(|f| f.family != RuleFamily::StreakReversal));
        assert!(formulas.iter().any(|f| {
            f.condition == Condition::PreviousIs { label: Label::Red }
                && f.prediction == Prediction::Fixed(Label::Green)
                && f.confidence == 1.0
        }));
    }

    #[test]
    fn family_breakdown_counts_each_family() {
        let miner = RuleMiner::default();
        let labels: Vec<Label> = (0..20)
            .map(|i| if i % 2 == 0 { Label::Red } else { Label::Green })
            .collect();
        let formulas = miner.mine(&seq(Mode::Color, labels));
        let breakdown = RuleMiner::family_breakdown(&formulas);
        let total: usize = breakdown.iter().map(|(_, c)| c).sum();
        assert_eq!(total, formulas.len());
    }
}
