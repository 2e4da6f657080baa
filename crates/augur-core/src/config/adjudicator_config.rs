use serde::{Deserialize, Serialize};

use super::defaults;

/// Optional LLM adjudicator configuration.
///
/// When `enabled` is `false` (the default) the rule engine's forecast is
/// always used as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjudicatorConfig {
    pub enabled: bool,
    /// Chat-completions style endpoint URL.
    pub endpoint: String,
    /// Model name sent with each request.
    pub model: String,
    /// Environment variable holding the bearer token.
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Number of ranked formulas summarized in the request.
    pub top_rules: usize,
    /// Number of most recent labels sent as context.
    pub recent_window: usize,
}

impl Default for AdjudicatorConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_ADJUDICATOR_ENABLED,
            endpoint: String::new(),
            model: String::new(),
            api_key_env: defaults::DEFAULT_ADJUDICATOR_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_ADJUDICATOR_TIMEOUT_SECS,
            top_rules: defaults::DEFAULT_ADJUDICATOR_TOP_RULES,
            recent_window: defaults::DEFAULT_ADJUDICATOR_RECENT_WINDOW,
        }
    }
}
