use augur_core::models::{Condition, Formula, Prediction};

use super::scan_rules;
use crate::features::FeatureSequence;

pub const STREAK_LENGTHS: [usize; 4] = [3, 4, 5, 6];

/// After K equal labels, bet on a reversal.
pub fn candidates(seq: &FeatureSequence) -> Vec<Formula> {
    let mut rules = Vec::new();
    for length in STREAK_LENGTHS {
        for label in seq.mode.labels() {
            rules.push((
                Condition::Streak { length, label },
                Prediction::Fixed(label.opposite()),
            ));
        }
    }
    scan_rules(seq, &rules).into_formulas()
}
