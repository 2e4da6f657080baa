//! AugurEngine — one scheduled invocation: ingest, per-mode cycles, trim.

use std::sync::Arc;

use tracing::{info, warn};

use augur_core::config::{AugurConfig, RetentionConfig};
use augur_core::errors::AugurError;
use augur_core::models::{InvocationOutcome, InvocationResult, Mode, Observation};
use augur_core::traits::{Adjudicator, FeedSource, IOutcomeStore};

use crate::degradation::DegradationTracker;
use crate::orchestrator::PredictionOrchestrator;

pub struct AugurEngine {
    feed: Box<dyn FeedSource>,
    feed_label: String,
    store: Arc<dyn IOutcomeStore>,
    orchestrator: PredictionOrchestrator,
    retention: RetentionConfig,
}

impl AugurEngine {
    pub fn new(
        config: &AugurConfig,
        feed: Box<dyn FeedSource>,
        store: Arc<dyn IOutcomeStore>,
    ) -> Self {
        let feed_label = if config.feed.url.is_empty() {
            "feed".to_string()
        } else {
            config.feed.url.clone()
        };
        Self {
            feed,
            feed_label,
            orchestrator: PredictionOrchestrator::new(config, Arc::clone(&store)),
            store,
            retention: config.retention.clone(),
        }
    }

    pub fn with_adjudicator(mut self, adjudicator: Arc<dyn Adjudicator>) -> Self {
        self.orchestrator = self.orchestrator.with_adjudicator(adjudicator);
        self
    }

    pub fn store(&self) -> &Arc<dyn IOutcomeStore> {
        &self.store
    }

    pub fn degradations(&self) -> &DegradationTracker {
        self.orchestrator.degradations()
    }

    /// Run one invocation end to end. Never returns an error: every failure
    /// is folded into the result's outcome.
    pub fn invoke(&mut self) -> InvocationResult {
        let history = match self.ingest() {
            Ok(history) => history,
            Err(outcome) => {
                warn!(?outcome, "invocation aborted before any cycle ran");
                return InvocationResult::failed(outcome);
            }
        };

        let mut reports = Vec::with_capacity(Mode::ALL.len());
        for mode in Mode::ALL {
            match self.orchestrator.run_cycle(mode, &history) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(mode = %mode, error = %e, "cycle aborted");
                    return InvocationResult::failed(classify(e));
                }
            }
        }

        match self.store.trim(&self.retention) {
            Ok(report) if report.total() > 0 => info!(
                observations = report.observations,
                predictions = report.predictions,
                formula_sets = report.formula_sets,
                "retention trim removed rows"
            ),
            Ok(_) => {}
            Err(e) => self.orchestrator.degradations_mut().record(
                "store.trim",
                e.to_string(),
                "rows kept until the next invocation",
            ),
        }

        let result = InvocationResult::completed(history.len(), reports);
        info!(
            records = result.records_processed,
            rules = result.active_rule_count,
            new_predictions = result.new_predictions,
            resolved = result.resolved_count,
            retrains = result.retrain_count,
            "invocation complete"
        );
        result
    }

    /// Fetch the latest page, persist it, and return the full history.
    fn ingest(&self) -> Result<Vec<Observation>, InvocationOutcome> {
        let _span = crate::ingest_span!(self.feed_label).entered();
        let page = self
            .feed
            .fetch()
            .map_err(|e| InvocationOutcome::UpstreamError {
                reason: e.to_string(),
            })?;

        let added = self.store.insert_observations(&page).map_err(storage)?;
        let history = self.store.all_observations().map_err(storage)?;
        info!(
            fetched = page.len(),
            added,
            history = history.len(),
            "ingest complete"
        );
        Ok(history)
    }
}

fn storage(e: AugurError) -> InvocationOutcome {
    InvocationOutcome::StorageError {
        reason: e.to_string(),
    }
}

fn classify(e: AugurError) -> InvocationOutcome {
    match e {
        AugurError::StorageError(_) => storage(e),
        other => InvocationOutcome::Failed {
            reason: other.to_string(),
        },
    }
}
