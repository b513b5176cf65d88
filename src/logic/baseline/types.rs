use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// PARAMETER STATS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredStats")]
pub struct ParameterStats {
    pub mean: f64,
    /// Sample (n-1) standard deviation, never zero (see [`ParameterStats::new`])
    pub std_dev: f64,
}

impl ParameterStats {
    /// A zero standard deviation is stored as 1.0 so constant training
    /// columns do not turn every tiny deviation into an infinite z-score.
    pub fn new(mean: f64, std_dev: f64) -> Self {
        let std_dev = if std_dev == 0.0 { 1.0 } else { std_dev };
        Self { mean, std_dev }
    }

    pub fn z_score(&self, value: f64) -> f64 {
        ((value - self.mean) / self.std_dev).abs()
    }
}

/// Wire form; loading goes through [`ParameterStats::new`] again
#[derive(Deserialize)]
struct StoredStats {
    mean: f64,
    std_dev: f64,
}

impl From<StoredStats> for ParameterStats {
    fn from(stored: StoredStats) -> Self {
        ParameterStats::new(stored.mean, stored.std_dev)
    }
}

// ============================================================================
// BASELINE
// ============================================================================

/// Immutable per-parameter fingerprint. Build it with [`super::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    params: Vec<ParameterStats>,
    samples: usize,
    created_at: DateTime<Utc>,
}

impl Baseline {
    pub(super) fn new(params: Vec<ParameterStats>, samples: usize) -> Self {
        Self {
            params,
            samples,
            created_at: Utc::now(),
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[ParameterStats] {
        &self.params
    }

    pub fn means(&self) -> Vec<f64> {
        self.params.iter().map(|p| p.mean).collect()
    }

    /// Number of training samples the baseline was fitted on
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
