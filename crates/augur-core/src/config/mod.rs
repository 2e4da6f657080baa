//! Configuration loaded from TOML. Every section falls back to its defaults.

pub mod defaults;

mod adjudicator_config;
mod feed_config;
mod mining_config;
mod observability_config;
mod policy_config;
mod retention_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use adjudicator_config::AdjudicatorConfig;
pub use feed_config::FeedConfig;
pub use mining_config::MiningConfig;
pub use observability_config::ObservabilityConfig;
pub use policy_config::PolicyConfig;
pub use retention_config::RetentionConfig;
pub use storage_config::StorageConfig;

use crate::errors::{AugurError, AugurResult};

/// Top-level configuration for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AugurConfig {
    pub storage: StorageConfig,
    pub mining: MiningConfig,
    pub policy: PolicyConfig,
    pub feed: FeedConfig,
    pub adjudicator: AdjudicatorConfig,
    pub retention: RetentionConfig,
    pub observability: ObservabilityConfig,
}

impl AugurConfig {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> AugurResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| AugurError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file from disk.
    pub fn load(path: &Path) -> AugurResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AugurError::ConfigError {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml(&text)
    }

    /// Reject values the engine cannot operate with.
    pub fn validate(&self) -> AugurResult<()> {
        let invalid = |reason: String| Err(AugurError::ConfigError { reason });

        if !(0.0..=1.0).contains(&self.mining.min_confidence) {
            return invalid(format!(
                "mining.min_confidence must be within [0, 1], got {}",
                self.mining.min_confidence
            ));
        }
        if !(0.0..=1.0).contains(&self.mining.min_support_ratio) {
            return invalid(format!(
                "mining.min_support_ratio must be within [0, 1], got {}",
                self.mining.min_support_ratio
            ));
        }
        if self.mining.max_formulas == 0 {
            return invalid("mining.max_formulas must be at least 1".into());
        }
        if self.mining.color_marker.trim().is_empty() {
            return invalid("mining.color_marker must not be empty".into());
        }
        if self.policy.failure_threshold == 0 {
            return invalid("policy.failure_threshold must be at least 1".into());
        }
        if self.storage.read_pool_size == 0 {
            return invalid("storage.read_pool_size must be at least 1".into());
        }
        Ok(())
    }
}
