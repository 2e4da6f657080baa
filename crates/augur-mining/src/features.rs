//! FeatureExtractor — projects raw observations onto a mode's two labels.

use augur_core::config::MiningConfig;
use augur_core::errors::{AugurResult, MiningError};
use augur_core::models::{Label, Mode, Observation};

/// Index-aligned label and numeric sequences for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSequence {
    pub mode: Mode,
    pub labels: Vec<Label>,
    pub numbers: Vec<i64>,
}

impl FeatureSequence {
    /// Build from pre-computed sequences. Both must have the same length.
    pub fn new(mode: Mode, labels: Vec<Label>, numbers: Vec<i64>) -> AugurResult<Self> {
        if labels.len() != numbers.len() {
            return Err(MiningError::SequenceMismatch {
                labels: labels.len(),
                numbers: numbers.len(),
            }
            .into());
        }
        Ok(Self {
            mode,
            labels,
            numbers,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Everything strictly before index `end`.
    pub fn prefix(&self, end: usize) -> (&[Label], &[i64]) {
        let end = end.min(self.len());
        (&self.labels[..end], &self.numbers[..end])
    }

    pub fn last_label(&self) -> Option<Label> {
        self.labels.last().copied()
    }

    /// The most recent `n` labels (fewer if the sequence is shorter).
    pub fn recent_labels(&self, n: usize) -> &[Label] {
        let start = self.len().saturating_sub(n);
        &self.labels[start..]
    }
}

/// Pure mapping from observations to labels. Safe to call repeatedly over
/// growing prefixes of the same history.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    color_marker: String,
    low_max_value: i64,
}

impl FeatureExtractor {
    pub fn new(config: &MiningConfig) -> Self {
        Self {
            color_marker: config.color_marker.trim().to_lowercase(),
            low_max_value: config.low_max_value,
        }
    }

    pub fn label(&self, observation: &Observation, mode: Mode) -> Label {
        match mode {
            Mode::Color => {
                if observation
                    .color_tag
                    .to_lowercase()
                    .contains(&self.color_marker)
                {
                    Label::Red
                } else {
                    Label::Green
                }
            }
            Mode::Size => {
                if observation.numeric_value <= self.low_max_value {
                    Label::Low
                } else {
                    Label::High
                }
            }
        }
    }

    /// Observations must already be sorted ascending by period.
    pub fn extract(&self, observations: &[Observation], mode: Mode) -> FeatureSequence {
        let labels = observations.iter().map(|o| self.label(o, mode)).collect();
        let numbers = observations.iter().map(|o| o.numeric_value).collect();
        FeatureSequence {
            mode,
            labels,
            numbers,
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(&MiningConfig::default())
    }
}
