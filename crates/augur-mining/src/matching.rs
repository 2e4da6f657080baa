//! Condition matching and symbolic prediction resolution.
//!
//! Mining and application both go through these two functions, so a rule
//! fires at application time exactly when it would have matched in training.
//! `labels` and `numbers` are the history strictly before the position being
//! predicted.

use augur_core::constants::{CLUSTER_HIGH_EXTREME, CLUSTER_LOW_EXTREME};
use augur_core::models::{AverageBand, Condition, Label, Prediction};

/// Mean of the last `window` numbers, or `None` if there are fewer.
pub fn moving_average(numbers: &[i64], window: usize) -> Option<f64> {
    if window == 0 || numbers.len() < window {
        return None;
    }
    let sum: i64 = numbers[numbers.len() - window..].iter().sum();
    Some(sum as f64 / window as f64)
}

fn tail<T>(items: &[T], n: usize) -> Option<&[T]> {
    if n == 0 || items.len() < n {
        None
    } else {
        Some(&items[items.len() - n..])
    }
}

fn band_contains(band: AverageBand, average: f64) -> bool {
    let low = average <= CLUSTER_LOW_EXTREME;
    let high = average >= CLUSTER_HIGH_EXTREME;
    match band {
        AverageBand::Low => low,
        AverageBand::High => high,
        AverageBand::Either => low || high,
    }
}

/// Whether `condition` holds at the end of the given history.
pub fn condition_holds(condition: &Condition, labels: &[Label], numbers: &[i64]) -> bool {
    match condition {
        Condition::Streak { length, label } => {
            tail(labels, *length).is_some_and(|t| t.iter().all(|l| l == label))
        }
        Condition::Pattern { pattern } => {
            tail(labels, pattern.len()).is_some_and(|t| t == pattern.as_slice())
        }
        Condition::Imbalance {
            window,
            threshold_pct,
            label,
        } => tail(labels, *window).is_some_and(|t| {
            let count = t.iter().filter(|l| *l == label).count();
            count * 100 >= usize::from(*threshold_pct) * window
        }),
        Condition::Alternating { length } => {
            *length >= 2
                && tail(labels, *length).is_some_and(|t| t.windows(2).all(|w| w[0] != w[1]))
        }
        Condition::PreviousIs { label } => labels.last() == Some(label),
        Condition::AverageBand { window, band } => {
            moving_average(numbers, *window).is_some_and(|avg| band_contains(*band, avg))
        }
        Condition::RepeatedBlock { block } => tail(labels, block.len() * 2).is_some_and(|t| {
            let (first, second) = t.split_at(block.len());
            first == block.as_slice() && second == block.as_slice()
        }),
    }
}

/// Concrete label a prediction stands for at the end of the given history.
///
/// Returns `None` when a symbolic prediction cannot be resolved (empty
/// history, or an average that is not at an extreme).
pub fn resolve_prediction(
    prediction: &Prediction,
    condition: &Condition,
    labels: &[Label],
    numbers: &[i64],
) -> Option<Label> {
    match prediction {
        Prediction::Fixed(label) => Some(*label),
        Prediction::ContinueAlternation => labels.last().map(Label::opposite),
        Prediction::FollowExtreme => {
            let window = match condition {
                Condition::AverageBand { window, .. } => *window,
                _ => return None,
            };
            let average = moving_average(numbers, window)?;
            if average <= CLUSTER_LOW_EXTREME {
                Some(Label::Low)
            } else if average >= CLUSTER_HIGH_EXTREME {
                Some(Label::High)
            } else {
                None
            }
        }
    }
}

/// Resolved label if the condition holds, `None` otherwise.
pub fn fire(
    condition: &Condition,
    prediction: &Prediction,
    labels: &[Label],
    numbers: &[i64],
) -> Option<Label> {
    if condition_holds(condition, labels, numbers) {
        resolve_prediction(prediction, condition, labels, numbers)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::{Green as G, High as H, Low as L, Red as R};

    #[test]
    fn streak_requires_full_length() {
        let cond = Condition::Streak { length: 4, label: R };
        assert!(condition_holds(&cond, &[G, R, R, R, R], &[0; 5]));
        assert!(!condition_holds(&cond, &[R, R, R], &[0; 3]));
        assert!(!condition_holds(&cond, &[R, R, G, R], &[0; 4]));
    }

    #[test]
    fn imbalance_uses_integer_threshold() {
        let cond = Condition::Imbalance {
            window: 5,
            threshold_pct: 80,
            label: R,
        };
        assert!(condition_holds(&cond, &[R, G, R, R, R], &[0; 5]));
        assert!(!condition_holds(&cond, &[R, G, G, R, R], &[0; 5]));
    }

    #[test]
    fn alternation_resolves_to_non_last_label() {
        let cond = Condition::Alternating { length: 5 };
        let history = [R, G, R, G, R];
        assert!(condition_holds(&cond, &history, &[0; 5]));
        assert_eq!(
            resolve_prediction(&Prediction::ContinueAlternation, &cond, &history, &[0; 5]),
            Some(G)
        );
        assert!(!condition_holds(&cond, &[R, G, G, R, G], &[0; 5]));
    }

    #[test]
    fn repeated_block_checks_both_copies() {
        let cond = Condition::RepeatedBlock { block: vec![H, L] };
        assert!(condition_holds(&cond, &[L, H, L, H, L], &[0; 5]));
        assert!(!condition_holds(&cond, &[H, L, H, H], &[0; 4]));
    }

    #[test]
    fn follow_extreme_reads_the_window_average() {
        let cond = Condition::AverageBand {
            window: 5,
            band: AverageBand::Either,
        };
        let labels = [L; 6];
        assert_eq!(
            fire(&cond, &Prediction::FollowExtreme, &labels, &[9, 1, 2, 0, 3, 4]),
            Some(L)
        );
        assert_eq!(
            fire(&cond, &Prediction::FollowExtreme, &labels, &[0, 7, 8, 6, 9, 5]),
            Some(H)
        );
        assert_eq!(fire(&cond, &Prediction::FollowExtreme, &labels, &[4, 5, 4, 5, 4, 5]), None);
    }

    #[test]
    fn moving_average_needs_full_window() {
        assert_eq!(moving_average(&[1, 2], 3), None);
        assert_eq!(moving_average(&[1, 2, 3], 3), Some(2.0));
        assert_eq!(moving_average(&[1, 2, 3], 0), None);
    }
}
