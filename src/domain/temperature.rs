// Temperature readings and accumulation summary as served by the upstream API
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSample {
    pub timestamp: String,
    pub temperature: f64,
}

#[cfg(test)]
impl TemperatureSample {
    pub fn new(timestamp: impl Into<String>, temperature: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature,
        }
    }
}

/// A peak marker, encoded on the wire as `[timestamp, value]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(String, f64)")]
pub struct PeakPoint {
    pub timestamp: String,
    pub value: f64,
}

impl PeakPoint {
    pub fn new(timestamp: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            value,
        }
    }
}

impl From<(String, f64)> for PeakPoint {
    fn from((timestamp, value): (String, f64)) -> Self {
        Self::new(timestamp, value)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccumulationSummary {
    pub accumulative_temperature: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub max_points: Vec<PeakPoint>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PeakPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PeakPoint>>::deserialize(deserializer)?.unwrap_or_default())
}
