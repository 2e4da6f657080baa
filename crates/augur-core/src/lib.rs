//! # augur-core
//!
//! Foundation crate for the Augur forecasting engine.
//! Defines the domain model, the closed rule-condition variants, collaborator
//! traits, errors, config, and constants. Every other crate in the workspace
//! depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AugurConfig;
pub use errors::{AugurError, AugurResult};
pub use models::{
    Condition, Formula, FormulaSet, Label, Mode, Observation, Prediction, PredictionOrigin,
    PredictionRecord, RuleFamily, SetCounters,
};
