//! # augur-mining
//!
//! The analytical core: label extraction, IF-THEN rule mining over seven
//! rule families, deterministic rule application with a two-tier fallback,
//! and the per-mode retrain policy.
//!
//! ## Rule families
//!
//! | Family | Condition | Prediction |
//! |--------|-----------|------------|
//! | Streak reversal | last K labels equal V | opposite of V |
//! | N-gram | last N labels equal P | each observed next label |
//! | Frequency imbalance | V fills ≥ t% of last W | opposite of V |
//! | Alternation | last K labels alternate | continue alternating |
//! | Transition | previous label is X | most frequent successor of X |
//! | Number cluster | moving average is extreme | LOW / HIGH / follow extreme |
//! | Repeated block | block B repeated twice | opposite of B's last label |
//!
//! Candidates are ranked by `confidence × support`; the ranking is also the
//! application priority.

pub mod applier;
pub mod backfill;
pub mod features;
pub mod matching;
pub mod miner;
pub mod policy;

pub use applier::{Forecast, ForecastSource, RuleApplier};
pub use backfill::{backfill_label, backfill_missing, BackfillPrediction};
pub use features::{FeatureExtractor, FeatureSequence};
pub use miner::RuleMiner;
pub use policy::{PolicyStep, RetrainPolicy};
