//! PredictionOrchestrator — one mode's cycle: resolve, account, retrain,
//! backfill, forecast.
//!
//! Nothing survives between invocations except what the store holds, so
//! every cycle starts from the stored active set and its counters.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use augur_core::config::{AdjudicatorConfig, AugurConfig};
use augur_core::errors::AugurResult;
use augur_core::models::{
    compare_period_ids, successor_period_id, Formula, FormulaSet, Label, Mode, ModeReport,
    Observation, PolicyState, PredictionOrigin, PredictionRecord,
};
use augur_core::traits::{Adjudicator, IOutcomeStore, NoOpAdjudicator, RuleSummary};
use augur_mining::{
    backfill_missing, FeatureExtractor, FeatureSequence, Forecast, RetrainPolicy, RuleApplier,
    RuleMiner,
};

use crate::degradation::DegradationTracker;
use crate::tracing_setup::events;

/// Label chosen for the next period and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decision {
    label: Label,
    origin: PredictionOrigin,
    applied_rule: Option<String>,
}

pub struct PredictionOrchestrator {
    store: Arc<dyn IOutcomeStore>,
    adjudicator: Arc<dyn Adjudicator>,
    adjudicator_config: AdjudicatorConfig,
    extractor: FeatureExtractor,
    miner: RuleMiner,
    applier: RuleApplier,
    policy: RetrainPolicy,
    degradations: DegradationTracker,
}

impl PredictionOrchestrator {
    pub fn new(config: &AugurConfig, store: Arc<dyn IOutcomeStore>) -> Self {
        Self {
            store,
            adjudicator: Arc::new(NoOpAdjudicator),
            adjudicator_config: config.adjudicator.clone(),
            extractor: FeatureExtractor::new(&config.mining),
            miner: RuleMiner::new(config.mining.clone()),
            applier: RuleApplier::new(),
            policy: RetrainPolicy::from_config(&config.policy),
            degradations: DegradationTracker::new(),
        }
    }

    pub fn with_adjudicator(mut self, adjudicator: Arc<dyn Adjudicator>) -> Self {
        self.adjudicator = adjudicator;
        self
    }

    pub fn store(&self) -> &Arc<dyn IOutcomeStore> {
        &self.store
    }

    pub fn degradations(&self) -> &DegradationTracker {
        &self.degradations
    }

    pub fn degradations_mut(&mut self) -> &mut DegradationTracker {
        &mut self.degradations
    }

    /// Run one cycle for `mode` over the full retained history (ascending).
    ///
    /// Essential reads and writes propagate their error; per-record write
    /// failures are recorded as degradations and skipped.
    pub fn run_cycle(&mut self, mode: Mode, history: &[Observation]) -> AugurResult<ModeReport> {
        let _span = crate::cycle_span!(mode, history.len()).entered();
        let seq = self.extractor.extract(history, mode);
        let positions: HashMap<&str, usize> = history
            .iter()
            .enumerate()
            .map(|(i, o)| (o.period_id.as_str(), i))
            .collect();

        let resolved = self.resolve_pending(mode, &seq, &positions)?;
        let resolved_count = resolved.len();

        let (active, state, retrains) = self.account_and_retrain(mode, &seq, resolved)?;
        let backfilled = self.backfill(mode, history, &seq)?;
        let forecast_period = self.forecast(mode, history, &seq, &active)?;

        let report = ModeReport {
            mode,
            state,
            active_set_id: Some(active.id.clone()),
            rule_count: active.len(),
            accuracy: active.counters.accuracy,
            total_predictions: active.counters.total_predictions,
            consecutive_failures: active.counters.consecutive_failures,
            retrains,
            resolved: resolved_count,
            backfilled,
            forecast_period,
        };
        info!(
            mode = %mode,
            state = %report.state,
            rules = report.rule_count,
            accuracy = report.accuracy,
            resolved = report.resolved,
            backfilled = report.backfilled,
            retrains = report.retrains,
            "cycle complete"
        );
        Ok(report)
    }

    /// Step 1. Returns the records this cycle resolved, in period order,
    /// with their verdicts.
    fn resolve_pending(
        &mut self,
        mode: Mode,
        seq: &FeatureSequence,
        positions: &HashMap<&str, usize>,
    ) -> AugurResult<Vec<(PredictionRecord, bool)>> {
        let mut resolved = Vec::new();
        for record in self.store.unresolved_predictions(mode)? {
            let Some(&index) = positions.get(record.period_id.as_str()) else {
                continue;
            };
            let correct = record.matches(seq.labels[index]);
            match self
                .store
                .resolve_prediction(&record.period_id, mode, correct)
            {
                Ok(true) => {
                    events::prediction_resolved(mode, &record.period_id, record.predicted, correct);
                    resolved.push((record, correct));
                }
                // Another invocation resolved it first.
                Ok(false) => {}
                Err(e) => self.degradations.record(
                    "store.resolve",
                    format!("{mode} {}: {e}", record.period_id),
                    "left unresolved for the next cycle",
                ),
            }
        }
        resolved.sort_by(|(a, _), (b, _)| compare_period_ids(&a.period_id, &b.period_id));
        Ok(resolved)
    }

    /// Step 2. Fold verdicts of the active set into its stored counters,
    /// retrain as soon as the policy asks for it.
    ///
    /// The store applies each verdict to whatever it currently holds, so
    /// outcomes recorded by an overlapping invocation are never overwritten.
    fn account_and_retrain(
        &mut self,
        mode: Mode,
        seq: &FeatureSequence,
        resolved: Vec<(PredictionRecord, bool)>,
    ) -> AugurResult<(FormulaSet, PolicyState, u32)> {
        let mut active = self.store.active_formula_set(mode)?;
        let mut step = self.policy.start(active.as_ref());
        let mut retrains = 0;

        if step.state == PolicyState::RetrainNeeded {
            if let Some(set) = &active {
                events::retrain_triggered(mode, Some(&set.id), set.counters.consecutive_failures);
            }
            active = Some(self.retrain(mode, seq)?);
            step = self.policy.activated();
            retrains += 1;
        }

        for (record, correct) in resolved {
            let Some(set) = active.as_mut() else {
                break;
            };
            if record.formula_set_id.as_deref() != Some(set.id.as_str()) {
                continue;
            }
            if step.state != PolicyState::Active {
                continue;
            }
            step = match self.store.record_set_outcome(&set.id, correct) {
                Ok(Some(stored)) => self.policy.resume(stored),
                Ok(None) => {
                    self.degradations.record(
                        "store.counters",
                        format!("{}: set no longer stored", set.id),
                        "counters kept in memory for this cycle",
                    );
                    self.policy.observe(step, correct)
                }
                Err(e) => {
                    self.degradations.record(
                        "store.counters",
                        format!("{}: {e}", set.id),
                        "counters kept in memory for this cycle",
                    );
                    self.policy.observe(step, correct)
                }
            };
            set.counters = step.counters;

            if step.needs_retrain() {
                events::retrain_triggered(mode, Some(&set.id), step.counters.consecutive_failures);
                active = Some(self.retrain(mode, seq)?);
                step = self.policy.activated();
                retrains += 1;
            }
        }

        let active = match active {
            Some(set) => set,
            None => {
                events::retrain_triggered(mode, None, 0);
                let set = self.retrain(mode, seq)?;
                step = self.policy.activated();
                retrains += 1;
                set
            }
        };
        Ok((active, step.state, retrains))
    }

    /// Mine the full history and atomically make the result the active set.
    fn retrain(&self, mode: Mode, seq: &FeatureSequence) -> AugurResult<FormulaSet> {
        let _span = crate::mining_span!(mode, seq.len()).entered();
        let mut set = self
            .miner
            .mine_set(seq, Uuid::new_v4().to_string(), Utc::now())?;
        self.store.activate_formula_set(&set)?;
        set.is_active = true;
        events::formula_set_activated(mode, &set.id, set.len(), &set.fingerprint);
        Ok(set)
    }

    /// Step 3. Causal backfill for observed periods with no record.
    ///
    /// Periods at or before the oldest retained record were pruned by
    /// retention and stay pruned.
    fn backfill(
        &mut self,
        mode: Mode,
        history: &[Observation],
        seq: &FeatureSequence,
    ) -> AugurResult<usize> {
        let predicted = self.store.predicted_periods(mode)?;
        let oldest = predicted
            .iter()
            .min_by(|a, b| compare_period_ids(a, b))
            .map(String::as_str);
        let missing: Vec<usize> = history
            .iter()
            .enumerate()
            .filter(|(_, o)| !predicted.contains(&o.period_id))
            .filter(|(_, o)| {
                oldest.map_or(true, |floor| {
                    compare_period_ids(&o.period_id, floor) == Ordering::Greater
                })
            })
            .map(|(i, _)| i)
            .collect();
        if missing.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut written = 0;
        for fill in backfill_missing(seq, &missing) {
            let record = PredictionRecord {
                period_id: history[fill.index].period_id.clone(),
                mode,
                predicted: fill.predicted,
                correct: Some(fill.correct),
                applied_rule: None,
                formula_set_id: None,
                origin: PredictionOrigin::Backfill,
                created_at: now,
            };
            match self.store.insert_prediction(&record) {
                Ok(true) => written += 1,
                Ok(false) => {}
                Err(e) => self.degradations.record(
                    "store.backfill",
                    format!("{mode} {}: {e}", record.period_id),
                    "period left without a record",
                ),
            }
        }
        debug!(mode = %mode, missing = missing.len(), written, "backfill complete");
        Ok(written)
    }

    /// Step 4. Forecast the successor of the latest period, once.
    fn forecast(
        &mut self,
        mode: Mode,
        history: &[Observation],
        seq: &FeatureSequence,
        active: &FormulaSet,
    ) -> AugurResult<Option<String>> {
        let Some(latest) = history.last() else {
            return Ok(None);
        };
        let period_id = successor_period_id(&latest.period_id);
        if self.store.get_prediction(&period_id, mode)?.is_some() {
            return Ok(None);
        }

        let forecast = self.applier.apply(&active.formulas, seq);
        let decision = self.decide(mode, &active.formulas, seq, forecast);
        let record = PredictionRecord {
            period_id: period_id.clone(),
            mode,
            predicted: decision.label,
            correct: None,
            applied_rule: decision.applied_rule,
            formula_set_id: Some(active.id.clone()),
            origin: decision.origin,
            created_at: Utc::now(),
        };
        if !self.store.insert_prediction(&record)? {
            return Ok(None);
        }
        events::forecast_emitted(
            mode,
            &period_id,
            record.predicted,
            record.origin,
            record.applied_rule.as_deref(),
        );
        Ok(Some(period_id))
    }

    /// Prefer a usable adjudicator label; otherwise the rule engine's.
    fn decide(
        &mut self,
        mode: Mode,
        formulas: &[Formula],
        seq: &FeatureSequence,
        forecast: Forecast,
    ) -> Decision {
        let engine = Decision {
            label: forecast.label,
            origin: PredictionOrigin::Engine,
            applied_rule: forecast.rule_id().map(str::to_string),
        };
        let rules: Vec<RuleSummary> = formulas
            .iter()
            .take(self.adjudicator_config.top_rules)
            .map(RuleSummary::from)
            .collect();
        let recent = seq.recent_labels(self.adjudicator_config.recent_window);

        match self.adjudicator.predict(mode, &rules, recent) {
            Ok(Some(label)) if mode.accepts(label) => {
                let agreeing = self
                    .applier
                    .agreeing_rule(formulas, mode, &seq.labels, &seq.numbers, label)
                    .map(|f| f.id.clone());
                Decision {
                    label,
                    origin: PredictionOrigin::Adjudicator,
                    applied_rule: agreeing,
                }
            }
            Ok(Some(label)) => {
                self.degradations.record(
                    "adjudicator",
                    format!("label {label} does not belong to mode {mode}"),
                    "rule engine forecast",
                );
                engine
            }
            Ok(None) => engine,
            Err(e) => {
                self.degradations
                    .record("adjudicator", e.to_string(), "rule engine forecast");
                engine
            }
        }
    }
}
