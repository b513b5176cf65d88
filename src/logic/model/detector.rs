//! Anomaly Detector - z-score classification against a fitted baseline
//!
//! Keeps two bounded histories sized by the same window:
//! - scored sensor samples (for sequential checks / status)
//! - accepted GPS fixes (for the speed-delta check)

use chrono::Utc;

use super::buffer::{BufferStatus, RingBuffer};
use super::types::{BufferedSample, DetectionResult, ParameterDetail};
use crate::constants::{DEFAULT_ANOMALY_THRESHOLD, DEFAULT_WINDOW_SIZE};
use crate::error::{DefenseError, DefenseResult};
use crate::logic::baseline::Baseline;
use crate::logic::telemetry::{GpsFix, Sample};

#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    baseline: Option<Baseline>,
    threshold: f64,
    history: RingBuffer<BufferedSample>,
    fixes: RingBuffer<GpsFix>,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(DEFAULT_ANOMALY_THRESHOLD, DEFAULT_WINDOW_SIZE)
    }
}

impl AnomalyDetector {
    pub fn new(threshold: f64, window_size: usize) -> Self {
        Self {
            baseline: None,
            threshold,
            history: RingBuffer::new(window_size),
            fixes: RingBuffer::new(window_size),
        }
    }

    pub fn set_baseline(&mut self, baseline: Baseline) {
        log::info!(
            "Detector baseline loaded ({} parameters, {} training samples)",
            baseline.arity(),
            baseline.sample_count()
        );
        self.baseline = Some(baseline);
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        if threshold != self.threshold {
            log::debug!("Detector threshold {:.3} -> {:.3}", self.threshold, threshold);
            self.threshold = threshold;
        }
    }

    pub fn window_size(&self) -> usize {
        self.history.capacity()
    }

    /// Shrinking the window evicts the oldest entries right away
    pub fn set_window_size(&mut self, window_size: usize) {
        if window_size != self.history.capacity() {
            log::debug!("Detector window {} -> {}", self.history.capacity(), window_size);
            self.history.set_capacity(window_size);
            self.fixes.set_capacity(window_size);
        }
    }

    /// Classify one sample.
    ///
    /// Without a baseline this fails closed: non-anomalous, zero confidence,
    /// nothing buffered. A NaN anywhere makes the sample anomalous.
    pub fn classify(&mut self, sample: &Sample) -> DefenseResult<DetectionResult> {
        let Some(baseline) = self.baseline.as_ref() else {
            return Ok(DetectionResult::no_baseline());
        };

        if sample.arity() != baseline.arity() {
            return Err(DefenseError::DimensionMismatch {
                expected: baseline.arity(),
                actual: sample.arity(),
            });
        }

        let threshold = self.threshold;
        let per_parameter_detail: Vec<ParameterDetail> = sample
            .values()
            .iter()
            .zip(baseline.params())
            .enumerate()
            .map(|(i, (&value, stats))| ParameterDetail {
                parameter_id: format!("param_{}", i),
                z_score: stats.z_score(value),
                threshold_used: threshold,
            })
            .collect();

        let score = max_z_score(per_parameter_detail.iter().map(|d| d.z_score));

        // NaN compares false against anything; count it as anomalous
        let is_anomaly = score.is_nan() || score > threshold;
        let confidence = if score.is_nan() {
            1.0
        } else {
            (score / threshold).min(1.0)
        };

        self.history.push(BufferedSample {
            sample: sample.clone(),
            score,
            timestamp: Utc::now(),
        });

        Ok(DetectionResult {
            is_anomaly,
            score,
            confidence,
            per_parameter_detail,
        })
    }

    /// Last GPS fix accepted into history
    pub fn last_fix(&self) -> Option<&GpsFix> {
        self.fixes.latest()
    }

    pub fn record_fix(&mut self, fix: GpsFix) {
        self.fixes.push(fix);
    }

    pub fn history(&self) -> impl Iterator<Item = &BufferedSample> {
        self.history.iter()
    }

    pub fn buffer_status(&self) -> BufferStatus {
        self.history.status()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.fixes.clear();
    }
}

/// Max over z-scores; any NaN poisons the result
fn max_z_score(scores: impl Iterator<Item = f64>) -> f64 {
    scores.fold(0.0, |acc, z| {
        if acc.is_nan() || z.is_nan() {
            f64::NAN
        } else {
            acc.max(z)
        }
    })
}
