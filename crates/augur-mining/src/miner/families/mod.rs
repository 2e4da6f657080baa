//! One module per rule family. Each returns raw candidates in discovery
//! order; thresholds and ranking are applied by the miner.

pub mod alternation;
pub mod cluster;
pub mod imbalance;
pub mod ngram;
pub mod repeat;
pub mod streak;
pub mod transition;

use augur_core::models::{Condition, Prediction};

use super::tally::TallyBook;
use crate::features::FeatureSequence;
use crate::matching;

/// Tally a fixed list of rules at every position of the sequence.
pub(crate) fn scan_rules(seq: &FeatureSequence, rules: &[(Condition, Prediction)]) -> TallyBook {
    let mut book = TallyBook::new();
    for i in 1..seq.len() {
        let (labels, numbers) = seq.prefix(i);
        let actual = seq.labels[i];
        for (condition, prediction) in rules {
            if let Some(predicted) = matching::fire(condition, prediction, labels, numbers) {
                book.record(condition, *prediction, predicted == actual);
            }
        }
    }
    book
}
