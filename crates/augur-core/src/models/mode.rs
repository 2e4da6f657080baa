//! Prediction modes and the binary labels each one projects outcomes onto.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AugurError;

/// Which categorical projection of an outcome is being predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Color,
    Size,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Color, Mode::Size];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Color => "color",
            Mode::Size => "size",
        }
    }

    /// The two labels of this mode, in canonical order.
    pub fn labels(&self) -> [Label; 2] {
        match self {
            Mode::Color => [Label::Red, Label::Green],
            Mode::Size => [Label::Low, Label::High],
        }
    }

    /// Forecast used when there is no history at all.
    pub fn default_label(&self) -> Label {
        match self {
            Mode::Color => Label::Red,
            Mode::Size => Label::High,
        }
    }

    pub fn accepts(&self, label: Label) -> bool {
        label.mode() == *self
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = AugurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" | "colour" => Ok(Mode::Color),
            "size" => Ok(Mode::Size),
            other => Err(AugurError::UnknownMode {
                name: other.to_string(),
            }),
        }
    }
}

/// A categorical outcome label. Each label belongs to exactly one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Red,
    Green,
    Low,
    High,
}

impl Label {
    pub fn mode(&self) -> Mode {
        match self {
            Label::Red | Label::Green => Mode::Color,
            Label::Low | Label::High => Mode::Size,
        }
    }

    /// The other label of the same mode.
    pub fn opposite(&self) -> Label {
        match self {
            Label::Red => Label::Green,
            Label::Green => Label::Red,
            Label::Low => Label::High,
            Label::High => Label::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Red => "RED",
            Label::Green => "GREEN",
            Label::Low => "LOW",
            Label::High => "HIGH",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = AugurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RED" => Ok(Label::Red),
            "GREEN" => Ok(Label::Green),
            "LOW" | "SMALL" => Ok(Label::Low),
            "HIGH" | "BIG" => Ok(Label::High),
            other => Err(AugurError::UnknownLabel {
                name: other.to_string(),
            }),
        }
    }
}
