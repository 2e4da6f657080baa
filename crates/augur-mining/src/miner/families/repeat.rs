use augur_core::models::{Condition, Formula, Prediction};

use crate::features::FeatureSequence;
use crate::miner::tally::TallyBook;

pub const BLOCK_LENGTHS: [usize; 2] = [2, 3];

/// A block of length R seen twice in a row; bet against its last label.
pub fn candidates(seq: &FeatureSequence) -> Vec<Formula> {
    let mut book = TallyBook::new();
    for r in BLOCK_LENGTHS {
        for i in (2 * r)..seq.len() {
            let window = &seq.labels[i - 2 * r..i];
            let (first, second) = window.split_at(r);
            if first != second {
                continue;
            }
            let Some(last) = second.last() else {
                continue;
            };
            let predicted = last.opposite();
            let condition = Condition::RepeatedBlock {
                block: second.to_vec(),
            };
            book.record(
                &condition,
                Prediction::Fixed(predicted),
                seq.labels[i] == predicted,
            );
        }
    }
    book.into_formulas()
}
