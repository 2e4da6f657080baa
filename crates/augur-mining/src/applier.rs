//! RuleApplier — turns a ranked formula list and the current tail into one
//! forecast label.
//!
//! Formulas are tried in stored (ranked) order. When none fires, the opposite
//! of the last observed label is used; with no history at all, the mode's
//! fixed default.

use serde::{Deserialize, Serialize};

use augur_core::models::{Formula, Label, Mode};

use crate::features::FeatureSequence;
use crate::matching;

/// Where a forecast label came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastSource {
    Rule { formula_id: String },
    /// No formula fired; opposite of the last label.
    TransitionDefault,
    /// Empty history; the mode's fixed default.
    AbsoluteDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub label: Label,
    pub source: ForecastSource,
}

impl Forecast {
    /// Id of the formula that produced the label, if any.
    pub fn rule_id(&self) -> Option<&str> {
        match &self.source {
            ForecastSource::Rule { formula_id } => Some(formula_id),
            _ => None,
        }
    }
}

/// Stateless; the formula list is passed in on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleApplier;

impl RuleApplier {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, formulas: &[Formula], seq: &FeatureSequence) -> Forecast {
        self.apply_tail(formulas, seq.mode, &seq.labels, &seq.numbers)
    }

    /// Forecast the position right after `labels` / `numbers`.
    pub fn apply_tail(
        &self,
        formulas: &[Formula],
        mode: Mode,
        labels: &[Label],
        numbers: &[i64],
    ) -> Forecast {
        for formula in formulas {
            if let Some(label) = self.fire_for_mode(formula, mode, labels, numbers) {
                return Forecast {
                    label,
                    source: ForecastSource::Rule {
                        formula_id: formula.id.clone(),
                    },
                };
            }
        }

        match labels.last() {
            Some(last) => Forecast {
                label: last.opposite(),
                source: ForecastSource::TransitionDefault,
            },
            None => Forecast {
                label: mode.default_label(),
                source: ForecastSource::AbsoluteDefault,
            },
        }
    }

    /// First formula, in ranked order, that fires and resolves to `label`.
    pub fn agreeing_rule<'a>(
        &self,
        formulas: &'a [Formula],
        mode: Mode,
        labels: &[Label],
        numbers: &[i64],
        label: Label,
    ) -> Option<&'a Formula> {
        formulas
            .iter()
            .find(|f| self.fire_for_mode(f, mode, labels, numbers) == Some(label))
    }

    fn fire_for_mode(
        &self,
        formula: &Formula,
        mode: Mode,
        labels: &[Label],
        numbers: &[i64],
    ) -> Option<Label> {
        matching::fire(&formula.condition, &formula.prediction, labels, numbers)
            .filter(|label| mode.accepts(*label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_core::models::{AverageBand, Condition, Prediction};
    use Label::{Green as G, High as H, Low as L, Red as R};

    fn formula(condition: Condition, prediction: Prediction) -> Formula {
        Formula::from_tally(condition, prediction, 8, 10).unwrap()
    }

    #[test]
    fn empty_history_uses_mode_default() {
        let applier = RuleApplier::new();
        let color = applier.apply_tail(&[], Mode::Color, &[], &[]);
        assert_eq!(color.label, R);
        assert_eq!(color.source, ForecastSource::AbsoluteDefault);
        let size = applier.apply_tail(&[], Mode::Size, &[], &[]);
        assert_eq!(size.label, H);
    }

    #[test]
    fn no_match_reverses_last_label() {
        let applier = RuleApplier::new();
        let rules = vec![formula(
            Condition::Streak { length: 4, label: R },
            Prediction::Fixed(G),
        )];
        let forecast = applier.apply_tail(&rules, Mode::Color, &[R, G, G], &[0; 3]);
        assert_eq!(forecast.label, R);
        assert_eq!(forecast.source, ForecastSource::TransitionDefault);
        assert_eq!(forecast.rule_id(), None);
    }

    #[test]
    fn first_ranked_match_wins() {
        let applier = RuleApplier::new();
        let rules = vec![
            formula(Condition::PreviousIs { label: G }, Prediction::Fixed(G)),
            formula(Condition::Alternating { length: 3 }, Prediction::ContinueAlternation),
        ];
        let forecast = applier.apply_tail(&rules, Mode::Color, &[G, R, G], &[0; 3]);
        assert_eq!(forecast.label, G);
        assert_eq!(forecast.rule_id(), Some(rules[0].id.as_str()));
    }

    #[test]
    fn alternation_continues_from_last_label() {
        let applier = RuleApplier::new();
        let rules = vec![formula(
            Condition::Alternating { length: 5 },
            Prediction::ContinueAlternation,
        )];
        let forecast = applier.apply_tail(&rules, Mode::Color, &[R, G, R, G, R], &[0; 5]);
        assert_eq!(forecast.label, G);
    }

    #[test]
    fn unresolvable_symbolic_prediction_falls_through() {
        let applier = RuleApplier::new();
        let rules = vec![formula(
            Condition::AverageBand {
                window: 3,
                band: AverageBand::Either,
            },
            Prediction::FollowExtreme,
        )];
        // Average 4.5 is not extreme: the condition fails.
        let forecast = applier.apply_tail(&rules, Mode::Size, &[L, H, H], &[4, 5, 5]);
        assert_eq!(forecast.source, ForecastSource::TransitionDefault);
        assert_eq!(forecast.label, L);

        let forecast = applier.apply_tail(&rules, Mode::Size, &[H, H, H], &[7, 8, 9]);
        assert_eq!(forecast.label, H);
        assert!(forecast.rule_id().is_some());
    }

    #[test]
    fn agreement_lookup_finds_matching_rule() {
        let applier = RuleApplier::new();
        let rules = vec![
            formula(Condition::PreviousIs { label: R }, Prediction::Fixed(R)),
            formula(Condition::Streak { length: 3, label: R }, Prediction::Fixed(G)),
        ];
        let tail = [R, R, R];
        let agree = applier.agreeing_rule(&rules, Mode::Color, &tail, &[0; 3], G);
        assert_eq!(agree.map(|f| f.id.as_str()), Some(rules[1].id.as_str()));
        let none = applier.agreeing_rule(&rules[..1], Mode::Color, &tail, &[0; 3], G);
        assert!(none.is_none());
    }
}
