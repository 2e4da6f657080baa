use augur_core::models::{AverageBand, Condition, Formula, Label, Prediction};

use super::scan_rules;
use crate::features::FeatureSequence;

pub const CLUSTER_WINDOWS: [usize; 3] = [5, 8, 10];

/// Extreme moving averages of the raw numbers. Size mode only; the miner
/// decides whether this family runs.
pub fn candidates(seq: &FeatureSequence) -> Vec<Formula> {
    let mut rules = Vec::new();
    for window in CLUSTER_WINDOWS {
        for band in [AverageBand::Low, AverageBand::High] {
            for label in [Label::Low, Label::High] {
                rules.push((
                    Condition::AverageBand { window, band },
                    Prediction::Fixed(label),
                ));
            }
        }
        rules.push((
            Condition::AverageBand {
                window,
                band: AverageBand::Either,
            },
            Prediction::FollowExtreme,
        ));
    }
    scan_rules(seq, &rules).into_formulas()
}
