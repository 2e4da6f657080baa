//! Structured log events for key engine operations.

use augur_core::models::{Label, Mode, PredictionOrigin};

pub fn formula_set_activated(mode: Mode, set_id: &str, rule_count: usize, fingerprint: &str) {
    tracing::info!(
        event = "formula_set_activated",
        mode = %mode,
        set_id = %set_id,
        rule_count = rule_count,
        fingerprint = %fingerprint,
        "formula set activated"
    );
}

pub fn retrain_triggered(mode: Mode, set_id: Option<&str>, consecutive_failures: u32) {
    tracing::info!(
        event = "retrain_triggered",
        mode = %mode,
        set_id = ?set_id,
        consecutive_failures = consecutive_failures,
        "retrain triggered"
    );
}

pub fn prediction_resolved(mode: Mode, period_id: &str, predicted: Label, correct: bool) {
    tracing::debug!(
        event = "prediction_resolved",
        mode = %mode,
        period_id = %period_id,
        predicted = %predicted,
        correct = correct,
        "prediction resolved"
    );
}

pub fn forecast_emitted(
    mode: Mode,
    period_id: &str,
    label: Label,
    origin: PredictionOrigin,
    rule: Option<&str>,
) {
    tracing::info!(
        event = "forecast_emitted",
        mode = %mode,
        period_id = %period_id,
        label = %label,
        origin = %origin,
        rule = ?rule,
        "forecast emitted"
    );
}

pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
