//! Sparse per-rule counters keyed by the typed `(Condition, Prediction)` pair.

use std::collections::HashMap;

use augur_core::models::{Condition, Formula, Prediction};

type RuleKey = (Condition, Prediction);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

/// Counters for candidate rules, remembering the order each key was first seen.
#[derive(Debug, Default)]
pub struct TallyBook {
    order: Vec<RuleKey>,
    tallies: HashMap<RuleKey, Tally>,
}

impl TallyBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one match of `condition`; `hit` when `prediction` was right.
    pub fn record(&mut self, condition: &Condition, prediction: Prediction, hit: bool) {
        let key = (condition.clone(), prediction);
        if !self.tallies.contains_key(&key) {
            self.order.push(key.clone());
        }
        let tally = self.tallies.entry(key).or_default();
        tally.total += 1;
        if hit {
            tally.correct += 1;
        }
    }

    pub fn get(&self, condition: &Condition, prediction: Prediction) -> Option<Tally> {
        self.tallies.get(&(condition.clone(), prediction)).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Formulas in discovery order. Keys that never matched are dropped.
    pub fn into_formulas(self) -> Vec<Formula> {
        let TallyBook { order, mut tallies } = self;
        order
            .into_iter()
            .filter_map(|key| {
                let tally = tallies.remove(&key)?;
                let (condition, prediction) = key;
                Formula::from_tally(condition, prediction, tally.correct, tally.total)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_core::models::Label;

    #[test]
    fn keeps_discovery_order() {
        let mut book = TallyBook::new();
        let b = Condition::PreviousIs { label: Label::Green };
        let a = Condition::PreviousIs { label: Label::Red };
        book.record(&b, Prediction::Fixed(Label::Red), true);
        book.record(&a, Prediction::Fixed(Label::Green), false);
        book.record(&b, Prediction::Fixed(Label::Red), false);

        assert_eq!(
            book.get(&b, Prediction::Fixed(Label::Red)),
            Some(Tally { correct: 1, total: 2 })
        );
        let formulas = book.into_formulas();
        assert_eq!(formulas.len(), 2);
        assert_eq!(formulas[0].condition, b);
        assert_eq!(formulas[1].condition, a);
        assert_eq!(formulas[1].confidence, 0.0);
    }
}
