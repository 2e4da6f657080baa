//! # augur-engine
//!
//! Per-mode prediction cycle ([`PredictionOrchestrator`]), the one-shot
//! invocation runner ([`AugurEngine`]), structured tracing, and degradation
//! tracking. The `augur` binary wires these to the SQLite store and the
//! HTTP adapters.

pub mod degradation;
pub mod engine;
pub mod orchestrator;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker};
pub use engine::AugurEngine;
pub use orchestrator::PredictionOrchestrator;
