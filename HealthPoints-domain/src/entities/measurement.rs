use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of health measurement a data point records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measurement {
    /// Body weight
    Weight,
    /// Systolic blood pressure (the higher number)
    Sbp,
    /// Diastolic blood pressure (the lower number)
    Dbp,
}

impl Measurement {
    /// Every measurement kind, in catalog order
    pub const ALL: [Measurement; 3] = [Measurement::Weight, Measurement::Sbp, Measurement::Dbp];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Measurement::Weight => "weight",
            Measurement::Sbp => "sbp",
            Measurement::Dbp => "dbp",
        }
    }

    /// Comma-separated wire names of every kind
    pub fn known_names() -> String {
        Self::ALL
            .iter()
            .map(Measurement::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known measurement kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMeasurement(pub String);

impl fmt::Display for UnknownMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown measurement kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownMeasurement {}

impl FromStr for Measurement {
    type Err = UnknownMeasurement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight" => Ok(Measurement::Weight),
            "sbp" => Ok(Measurement::Sbp),
            "dbp" => Ok(Measurement::Dbp),
            _ => Err(UnknownMeasurement(s.to_string())),
        }
    }
}
