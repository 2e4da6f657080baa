use augur_core::models::{Condition, Formula, Prediction};

use super::scan_rules;
use crate::features::FeatureSequence;

pub const ALTERNATION_LENGTHS: [usize; 4] = [3, 4, 5, 6];

/// After K strictly alternating labels, bet the alternation continues.
/// The predicted label is resolved from the tail, not stored.
pub fn candidates(seq: &FeatureSequence) -> Vec<Formula> {
    let rules: Vec<_> = ALTERNATION_LENGTHS
        .iter()
        .map(|&length| {
            (
                Condition::Alternating { length },
                Prediction::ContinueAlternation,
            )
        })
        .collect();
    scan_rules(seq, &rules).into_formulas()
}
