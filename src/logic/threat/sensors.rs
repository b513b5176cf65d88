//! Sensor Envelope Validator (data tampering)
//!
//! Flags readings outside the physical envelope of the onboard sensors.

use serde::{Deserialize, Serialize};

use super::types::Severity;
use crate::error::{DefenseError, DefenseResult};
use crate::logic::telemetry::Sample;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRange {
    pub channel: String,
    pub min: f64,
    pub max: f64,
}

impl SensorRange {
    pub fn new(channel: &str, min: f64, max: f64) -> Self {
        Self {
            channel: channel.to_string(),
            min,
            max,
        }
    }

    /// NaN is never within range
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutOfRange {
    pub channel: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TamperCheck {
    pub is_tampered: bool,
    pub severity: Option<Severity>,
    pub out_of_range: Vec<OutOfRange>,
}

/// Ordered per-channel ranges; arity must match the sensor sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEnvelope {
    ranges: Vec<SensorRange>,
}

impl Default for SensorEnvelope {
    /// Temperature, pressure, humidity, bus voltage, current
    fn default() -> Self {
        Self::new(vec![
            SensorRange::new("temperature_c", -40.0, 85.0),
            SensorRange::new("pressure_hpa", 800.0, 1100.0),
            SensorRange::new("humidity_pct", 0.0, 100.0),
            SensorRange::new("voltage_v", 10.0, 14.8),
            SensorRange::new("current_a", 0.5, 5.0),
        ])
    }
}

impl SensorEnvelope {
    pub fn new(ranges: Vec<SensorRange>) -> Self {
        Self { ranges }
    }

    pub fn arity(&self) -> usize {
        self.ranges.len()
    }

    pub fn check(&self, sample: &Sample) -> DefenseResult<TamperCheck> {
        if sample.arity() != self.ranges.len() {
            return Err(DefenseError::DimensionMismatch {
                expected: self.ranges.len(),
                actual: sample.arity(),
            });
        }

        let out_of_range: Vec<OutOfRange> = self
            .ranges
            .iter()
            .zip(sample.values())
            .filter(|(range, value)| !range.contains(**value))
            .map(|(range, &value)| OutOfRange {
                channel: range.channel.clone(),
                value,
                min: range.min,
                max: range.max,
            })
            .collect();

        let is_tampered = !out_of_range.is_empty();
        Ok(TamperCheck {
            is_tampered,
            severity: is_tampered.then_some(Severity::High),
            out_of_range,
        })
    }
}
