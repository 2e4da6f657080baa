use augur_core::models::{Condition, Formula, Prediction};

use crate::features::FeatureSequence;
use crate::miner::tally::TallyBook;

pub const NGRAM_LENGTHS: [usize; 4] = [2, 3, 4, 5];

/// Conditional next-label frequencies for every observed pattern of length N.
/// One candidate per (pattern, next label).
pub fn candidates(seq: &FeatureSequence) -> Vec<Formula> {
    let mut book = TallyBook::new();
    for n in NGRAM_LENGTHS {
        for i in n..seq.len() {
            let condition = Condition::Pattern {
                pattern: seq.labels[i - n..i].to_vec(),
            };
            let actual = seq.labels[i];
            for label in seq.mode.labels() {
                book.record(&condition, Prediction::Fixed(label), label == actual);
            }
        }
    }
    book.into_formulas()
}
