use serde::{Deserialize, Serialize};

use super::defaults;

/// Rule mining and feature extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Sequences shorter than this produce an empty rule set.
    pub min_sequence_length: usize,
    /// Minimum confidence for a candidate to survive.
    pub min_confidence: f64,
    /// Support floor as a share of the sequence length (rounded up).
    pub min_support_ratio: f64,
    /// Maximum number of formulas retained per mode.
    pub max_formulas: usize,
    /// Minimum sequence length before the number-clustering family runs.
    pub cluster_min_length: usize,
    /// Case-insensitive substring of the color tag that maps to RED.
    pub color_marker: String,
    /// Largest numeric value labeled LOW in size mode.
    pub low_max_value: i64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_sequence_length: defaults::DEFAULT_MIN_SEQUENCE_LENGTH,
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            min_support_ratio: defaults::DEFAULT_MIN_SUPPORT_RATIO,
            max_formulas: defaults::DEFAULT_MAX_FORMULAS,
            cluster_min_length: defaults::DEFAULT_CLUSTER_MIN_LENGTH,
            color_marker: defaults::DEFAULT_COLOR_MARKER.to_string(),
            low_max_value: defaults::DEFAULT_LOW_MAX_VALUE,
        }
    }
}
