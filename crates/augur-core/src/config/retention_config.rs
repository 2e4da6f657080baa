use serde::{Deserialize, Serialize};

use super::defaults;

/// Row-count retention applied by the store after each invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// Most recent observations kept.
    pub max_observations: usize,
    /// Most recent prediction records kept per mode.
    pub max_predictions_per_mode: usize,
    /// Most recent inactive formula sets kept per mode. Active sets are never trimmed.
    pub max_inactive_sets_per_mode: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            max_observations: defaults::DEFAULT_MAX_OBSERVATIONS,
            max_predictions_per_mode: defaults::DEFAULT_MAX_PREDICTIONS_PER_MODE,
            max_inactive_sets_per_mode: defaults::DEFAULT_MAX_INACTIVE_SETS_PER_MODE,
        }
    }
}
