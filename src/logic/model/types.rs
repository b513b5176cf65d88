//! Detection Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::telemetry::Sample;

/// z-score of one parameter against the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDetail {
    pub parameter_id: String,
    pub z_score: f64,
    pub threshold_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub is_anomaly: bool,
    /// Max z-score across parameters
    pub score: f64,
    /// min(score / threshold, 1)
    pub confidence: f64,
    /// One entry per parameter, in parameter order
    pub per_parameter_detail: Vec<ParameterDetail>,
}

impl DetectionResult {
    /// Result returned when no baseline is loaded: never blocks, never claims detection
    pub fn no_baseline() -> Self {
        Self {
            is_anomaly: false,
            score: 0.0,
            confidence: 0.0,
            per_parameter_detail: Vec::new(),
        }
    }
}

/// Ring buffer entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferedSample {
    pub sample: Sample,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}
