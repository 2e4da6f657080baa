//! RetrainPolicy — per-mode state machine over live set performance.
//!
//! State and counters are plain values threaded through each call; the
//! policy itself only holds the failure threshold.

use augur_core::config::PolicyConfig;
use augur_core::models::{FormulaSet, PolicyState, SetCounters};

/// Policy state plus the counters of the set it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyStep {
    pub state: PolicyState,
    pub counters: SetCounters,
}

impl PolicyStep {
    pub fn needs_retrain(&self) -> bool {
        matches!(
            self.state,
            PolicyState::NoActiveSet | PolicyState::RetrainNeeded
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetrainPolicy {
    failure_threshold: u32,
}

impl RetrainPolicy {
    pub fn new(failure_threshold: u32) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.failure_threshold)
    }

    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold
    }

    /// Initial step for the currently active set, if any.
    pub fn start(&self, active: Option<&FormulaSet>) -> PolicyStep {
        match active {
            None => PolicyStep {
                state: PolicyState::NoActiveSet,
                counters: SetCounters::default(),
            },
            Some(set) => PolicyStep {
                state: self.classify(&set.counters),
                counters: set.counters,
            },
        }
    }

    /// Fold one resolved forecast of the active set into the step.
    /// Outside `Active` the step is returned unchanged.
    pub fn observe(&self, step: PolicyStep, correct: bool) -> PolicyStep {
        if step.state != PolicyState::Active {
            return step;
        }
        let mut counters = step.counters;
        counters.record(correct);
        self.resume(counters)
    }

    /// Step for counters already folded by the store.
    pub fn resume(&self, counters: SetCounters) -> PolicyStep {
        PolicyStep {
            state: self.classify(&counters),
            counters,
        }
    }

    /// Step for a freshly activated set.
    pub fn activated(&self) -> PolicyStep {
        PolicyStep {
            state: PolicyState::Active,
            counters: SetCounters::default(),
        }
    }

    fn classify(&self, counters: &SetCounters) -> PolicyState {
        if counters.consecutive_failures >= self.failure_threshold {
            PolicyState::RetrainNeeded
        } else {
            PolicyState::Active
        }
    }
}

impl Default for RetrainPolicy {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_core::models::Mode;
    use chrono::Utc;

    #[test]
    fn no_active_set_needs_retrain() {
        let policy = RetrainPolicy::default();
        let step = policy.start(None);
        assert_eq!(step.state, PolicyState::NoActiveSet);
        assert!(step.needs_retrain());
        // Observations do not count without an active set.
        assert_eq!(policy.observe(step, false), step);
    }

    #[test]
    fn correct_resets_streak() {
        let policy = RetrainPolicy::default();
        let mut step = policy.activated();
        step = policy.observe(step, false);
        step = policy.observe(step, false);
        assert_eq!(step.counters.consecutive_failures, 2);
        step = policy.observe(step, true);
        assert_eq!(step.counters.consecutive_failures, 0);
        assert_eq!(step.counters.total_predictions, 3);
        assert_eq!(step.counters.correct_predictions, 1);
        assert!((step.counters.accuracy - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(step.state, PolicyState::Active);
    }

    #[test]
    fn three_failures_trigger_retrain() {
        let policy = RetrainPolicy::default();
        let mut step = policy.activated();
        for _ in 0..2 {
            step = policy.observe(step, false);
            assert!(!step.needs_retrain());
        }
        step = policy.observe(step, false);
        assert_eq!(step.state, PolicyState::RetrainNeeded);
        assert_eq!(step.counters.accuracy, 0.0);

        // Further outcomes are ignored until a new set is activated.
        let after = policy.observe(step, true);
        assert_eq!(after, step);
        assert_eq!(policy.activated().counters, SetCounters::default());
    }

    #[test]
    fn stored_counters_at_threshold_start_in_retrain() {
        let policy = RetrainPolicy::new(3);
        let mut set = FormulaSet::new("s1", Mode::Size, Vec::new(), 0, Utc::now()).unwrap();
        set.counters.consecutive_failures = 3;
        assert_eq!(policy.start(Some(&set)).state, PolicyState::RetrainNeeded);
        set.counters.consecutive_failures = 2;
        assert_eq!(policy.start(Some(&set)).state, PolicyState::Active);
    }

    #[test]
    fn resume_classifies_counters_written_elsewhere() {
        let policy = RetrainPolicy::new(3);
        let mut counters = SetCounters::default();
        counters.record(false);
        counters.record(false);
        assert_eq!(policy.resume(counters).state, PolicyState::Active);
        counters.record(false);
        let step = policy.resume(counters);
        assert_eq!(step.state, PolicyState::RetrainNeeded);
        assert_eq!(step.counters.total_predictions, 3);
    }

    #[test]
    fn threshold_is_configurable() {
        let policy = RetrainPolicy::new(1);
        let step = policy.observe(policy.activated(), false);
        assert!(step.needs_retrain());
    }
}
