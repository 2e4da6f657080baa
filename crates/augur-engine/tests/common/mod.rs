#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use augur_core::config::RetentionConfig;
use augur_core::errors::{AugurError, AugurResult, FeedError, StorageError};
use augur_core::models::{FormulaSet, Label, Mode, Observation, PredictionRecord, SetCounters};
use augur_core::traits::{Adjudicator, FeedSource, IOutcomeStore, RuleSummary, TrimReport};
use augur_storage::SqliteStore;

pub fn period(i: usize) -> String {
    format!("20260101{i:04}")
}

pub fn history(len: usize) -> Vec<Observation> {
    (1..=len)
        .map(|i| {
            let color = if i % 3 == 0 { "red" } else { "green" };
            Observation::new(period(i), ((i * 7) % 10) as i64, color)
        })
        .collect()
}

/// Number whose size label differs from `predicted`.
pub fn number_against(predicted: Label) -> i64 {
    match predicted {
        Label::Low => 9,
        _ => 0,
    }
}

/// Feed serving a shared, mutable page.
#[derive(Clone, Default)]
pub struct ScriptedFeed {
    page: Arc<Mutex<Vec<Observation>>>,
    down: Arc<AtomicBool>,
}

impl ScriptedFeed {
    pub fn new(page: Vec<Observation>) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
            down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn push(&self, observation: Observation) {
        self.page.lock().unwrap().push(observation);
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

impl FeedSource for ScriptedFeed {
    fn fetch(&self) -> AugurResult<Vec<Observation>> {
        if self.down.load(Ordering::SeqCst) {
            return Err(FeedError::Unreachable {
                reason: "scripted outage".to_string(),
            }
            .into());
        }
        Ok(self.page.lock().unwrap().clone())
    }
}

/// Always answers with the first label of the mode.
pub struct FirstLabelAdjudicator;

impl Adjudicator for FirstLabelAdjudicator {
    fn predict(&self, mode: Mode, _: &[RuleSummary], _: &[Label]) -> AugurResult<Option<Label>> {
        Ok(Some(mode.labels()[0]))
    }
}

/// Always answers `Red`, which only the color mode accepts.
pub struct RedAdjudicator;

impl Adjudicator for RedAdjudicator {
    fn predict(&self, _: Mode, _: &[RuleSummary], _: &[Label]) -> AugurResult<Option<Label>> {
        Ok(Some(Label::Red))
    }
}

pub struct FailingAdjudicator;

impl Adjudicator for FailingAdjudicator {
    fn predict(&self, _: Mode, _: &[RuleSummary], _: &[Label]) -> AugurResult<Option<Label>> {
        Err(AugurError::AdjudicatorError {
            reason: "timed out".to_string(),
        })
    }
}

/// In-memory SQLite store with switchable failures.
#[derive(Clone)]
pub struct FlakyStore {
    inner: Arc<SqliteStore>,
    pub fail_history: Arc<AtomicBool>,
    pub fail_active: Arc<AtomicBool>,
    pub fail_resolve: Arc<AtomicBool>,
    pub fail_trim: Arc<AtomicBool>,
    /// Records one failure for the read set right after the next active-set
    /// read, as an overlapping invocation would.
    pub interleave_failure: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SqliteStore::open_in_memory().unwrap()),
            fail_history: Arc::default(),
            fail_active: Arc::default(),
            fail_resolve: Arc::default(),
            fail_trim: Arc::default(),
            interleave_failure: Arc::default(),
        }
    }

    fn check(flag: &AtomicBool) -> AugurResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(StorageError::SqliteError {
                message: "database is locked".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl IOutcomeStore for FlakyStore {
    fn insert_observations(&self, observations: &[Observation]) -> AugurResult<usize> {
        self.inner.insert_observations(observations)
    }

    fn all_observations(&self) -> AugurResult<Vec<Observation>> {
        Self::check(&self.fail_history)?;
        self.inner.all_observations()
    }

    fn active_formula_set(&self, mode: Mode) -> AugurResult<Option<FormulaSet>> {
        Self::check(&self.fail_active)?;
        let set = self.inner.active_formula_set(mode)?;
        if let Some(set) = &set {
            if self.interleave_failure.swap(false, Ordering::SeqCst) {
                self.inner.record_set_outcome(&set.id, false)?;
            }
        }
        Ok(set)
    }

    fn activate_formula_set(&self, set: &FormulaSet) -> AugurResult<()> {
        self.inner.activate_formula_set(set)
    }

    fn record_set_outcome(&self, set_id: &str, correct: bool) -> AugurResult<Option<SetCounters>> {
        self.inner.record_set_outcome(set_id, correct)
    }

    fn formula_sets(&self, mode: Mode, limit: usize) -> AugurResult<Vec<FormulaSet>> {
        self.inner.formula_sets(mode, limit)
    }

    fn insert_prediction(&self, record: &PredictionRecord) -> AugurResult<bool> {
        self.inner.insert_prediction(record)
    }

    fn get_prediction(&self, period_id: &str, mode: Mode) -> AugurResult<Option<PredictionRecord>> {
        self.inner.get_prediction(period_id, mode)
    }

    fn unresolved_predictions(&self, mode: Mode) -> AugurResult<Vec<PredictionRecord>> {
        self.inner.unresolved_predictions(mode)
    }

    fn predicted_periods(&self, mode: Mode) -> AugurResult<BTreeSet<String>> {
        self.inner.predicted_periods(mode)
    }

    fn resolve_prediction(&self, period_id: &str, mode: Mode, correct: bool) -> AugurResult<bool> {
        Self::check(&self.fail_resolve)?;
        self.inner.resolve_prediction(period_id, mode, correct)
    }

    fn trim(&self, retention: &RetentionConfig) -> AugurResult<TrimReport> {
        Self::check(&self.fail_trim)?;
        self.inner.trim(retention)
    }
}
