use augur_core::models::{Condition, Formula, Prediction};

use super::scan_rules;
use crate::features::FeatureSequence;

pub const IMBALANCE_WINDOWS: [usize; 4] = [5, 8, 10, 15];
pub const IMBALANCE_THRESHOLDS_PCT: [u8; 3] = [70, 80, 90];

/// When one label dominates a recent window, bet on mean reversion.
pub fn candidates(seq: &FeatureSequence) -> Vec<Formula> {
    let mut rules = Vec::new();
    for window in IMBALANCE_WINDOWS {
        for threshold_pct in IMBALANCE_THRESHOLDS_PCT {
            for label in seq.mode.labels() {
                rules.push((
                    Condition::Imbalance {
                        window,
                        threshold_pct,
                        label,
                    },
                    Prediction::Fixed(label.opposite()),
                ));
            }
        }
    }
    scan_rules(seq, &rules).into_formulas()
}
