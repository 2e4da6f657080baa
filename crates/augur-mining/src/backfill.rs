//! Retroactive predictions for observed periods that never got a forecast.
//!
//! Backfill uses only the labels strictly before each period and the
//! last-label reversal heuristic, not the mined rule set.

use augur_core::models::{Label, Mode};

use crate::features::FeatureSequence;

/// Opposite of the last prior label, or the mode default with no history.
pub fn backfill_label(mode: Mode, prior: &[Label]) -> Label {
    prior
        .last()
        .map(Label::opposite)
        .unwrap_or_else(|| mode.default_label())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillPrediction {
    /// Position of the period in the sequence.
    pub index: usize,
    pub predicted: Label,
    pub correct: bool,
}

/// Backfill each index in `missing`. Indices outside the sequence are skipped.
pub fn backfill_missing(seq: &FeatureSequence, missing: &[usize]) -> Vec<BackfillPrediction> {
    missing
        .iter()
        .filter(|&&index| index < seq.len())
        .map(|&index| {
            let predicted = backfill_label(seq.mode, &seq.labels[..index]);
            BackfillPrediction {
                index,
                predicted,
                correct: predicted == seq.labels[index],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::{Green as G, High as H, Low as L, Red as R};

    #[test]
    fn first_period_uses_default() {
        assert_eq!(backfill_label(Mode::Color, &[]), R);
        assert_eq!(backfill_label(Mode::Size, &[]), H);
        assert_eq!(backfill_label(Mode::Size, &[H, L]), H);
    }

    #[test]
    fn fills_only_requested_indices() {
        let seq = FeatureSequence::new(Mode::Color, vec![R, R, G, G], vec![0; 4]).unwrap();
        let filled = backfill_missing(&seq, &[0, 2, 9]);
        assert_eq!(
            filled,
            vec![
                BackfillPrediction {
                    index: 0,
                    predicted: R,
                    correct: true
                },
                BackfillPrediction {
                    index: 2,
                    predicted: G,
                    correct: true
                },
            ]
        );
    }
}
