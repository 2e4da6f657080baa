use augur_core::models::{Condition, Formula, Label, Prediction};

use crate::features::FeatureSequence;

/// First-order transition matrix. One candidate per previous label,
/// predicting its most frequent successor (ties go to the mode's first label).
pub fn candidates(seq: &FeatureSequence) -> Vec<Formula> {
    let labels = seq.mode.labels();
    let index_of = |label: Label| labels.iter().position(|l| *l == label);

    let mut counts = [[0u32; 2]; 2];
    let mut first_seen: Vec<usize> = Vec::with_capacity(2);
    for pair in seq.labels.windows(2) {
        let (Some(from), Some(to)) = (index_of(pair[0]), index_of(pair[1])) else {
            continue;
        };
        if !first_seen.contains(&from) {
            first_seen.push(from);
        }
        counts[from][to] += 1;
    }

    first_seen
        .into_iter()
        .filter_map(|from| {
            let row = counts[from];
            let best = if row[1] > row[0] { 1 } else { 0 };
            Formula::from_tally(
                Condition::PreviousIs {
                    label: labels[from],
                },
                Prediction::Fixed(labels[best]),
                row[best],
                row[0] + row[1],
            )
        })
        .collect()
}
