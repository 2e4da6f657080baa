use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrain policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Consecutive failures of the active set that force a retrain.
    pub failure_threshold: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            failure_threshold: defaults::DEFAULT_FAILURE_THRESHOLD,
        }
    }
}
