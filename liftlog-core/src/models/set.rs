use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit a set was performed in.
///
/// The serialized spellings (`kg`, `lbs`, `bodyw`) are part of the
/// persisted workout format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetUnit {
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lbs")]
    Pounds,
    #[serde(rename = "bodyw")]
    Bodyweight,
}

impl SetUnit {
    pub fn is_bodyweight(&self) -> bool {
        matches!(self, SetUnit::Bodyweight)
    }
}

impl fmt::Display for SetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetUnit::Kilograms => write!(f, "kg"),
            SetUnit::Pounds => write!(f, "lbs"),
            SetUnit::Bodyweight => write!(f, "bodyweight"),
        }
    }
}

impl FromStr for SetUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kgs" => Ok(SetUnit::Kilograms),
            "lb" | "lbs" => Ok(SetUnit::Pounds),
            "bw" | "bodyw" | "bodyweight" => Ok(SetUnit::Bodyweight),
            _ => Err(format!(
                "Invalid set unit '{}'. Valid options: kg, lbs, bw",
                s
            )),
        }
    }
}

/// One resistance-training set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Set {
    #[serde(deserialize_with = "deserialize_reps")]
    pub reps: u32,
    pub weight: f64,
    pub unit: SetUnit,
}

/// Accepts any JSON number (or null) for reps. Negative values read as 0
/// and values past `u32::MAX` saturate, so older entries never make the
/// whole list unreadable.
fn deserialize_reps<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let reps = Option::<f64>::deserialize(deserializer)?;
    // `as` saturates and maps NaN to 0
    Ok(reps.map(|n| n as u32).unwrap_or(0))
}

impl Set {
    /// Creates a set, zeroing the weight for bodyweight sets and for
    /// negative or non-finite weights.
    pub fn new(reps: u32, weight: f64, unit: SetUnit) -> Self {
        let weight = if unit.is_bodyweight() || !weight.is_finite() || weight < 0.0 {
            0.0
        } else {
            weight
        };
        Self { reps, weight, unit }
    }

    pub fn bodyweight(reps: u32) -> Self {
        Self::new(reps, 0.0, SetUnit::Bodyweight)
    }

    /// An empty set as the editor creates it.
    pub fn empty(unit: SetUnit) -> Self {
        Self::new(0, 0.0, unit)
    }

    /// Re-applies the construction rules to a set that may have been built
    /// field by field or deserialized.
    pub fn normalized(self) -> Self {
        Self::new(self.reps, self.weight, self.unit)
    }

    /// Reps times weight; always zero for bodyweight sets.
    pub fn volume(&self) -> f64 {
        if self.unit.is_bodyweight() {
            0.0
        } else {
            self.reps as f64 * self.weight
        }
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_bodyweight() {
            write!(f, "{} x bodyweight", self.reps)
        } else {
            write!(f, "{} x {} {}", self.reps, self.weight, self.unit)
        }
    }
}
