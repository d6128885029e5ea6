use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic label of one dimension of a hyperstack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxisLabel {
    X,
    Y,
    Channel,
    Z,
    Time,
    Custom(String),
}

impl AxisLabel {
    /// Short tag used by the native stack file format.
    pub fn as_str(&self) -> &str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Channel => "Channel",
            Self::Z => "Z",
            Self::Time => "Time",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisLabel {
    type Err = Infallible;

    /// Case-insensitive; anything unrecognised becomes a custom label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let label = match trimmed.to_ascii_lowercase().as_str() {
            "x" => Self::X,
            "y" => Self::Y,
            "c" | "ch" | "channel" => Self::Channel,
            "z" => Self::Z,
            "t" | "time" => Self::Time,
            _ => Self::Custom(trimmed.to_string()),
        };
        Ok(label)
    }
}

impl From<String> for AxisLabel {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(label) => label,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for AxisLabel {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<AxisLabel> for String {
    fn from(label: AxisLabel) -> Self {
        label.to_string()
    }
}

/// An axis label paired with its index in a hyperstack's axis ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisSpec {
    pub label: AxisLabel,
    pub index: usize,
}
