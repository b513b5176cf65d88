//! Baseline fitting (one-shot batch computation)

use super::types::{Baseline, ParameterStats};
use crate::error::{DefenseError, DefenseResult};
use crate::logic::telemetry::Sample;

/// Sample standard deviation is undefined below two observations
pub const MIN_TRAINING_SAMPLES: usize = 2;

/// Fit column-wise mean and unbiased standard deviation.
///
/// Every training sample must share the arity of the first one.
pub fn fit(training: &[Sample]) -> DefenseResult<Baseline> {
    if training.len() < MIN_TRAINING_SAMPLES {
        return Err(DefenseError::InsufficientData {
            required: MIN_TRAINING_SAMPLES,
            actual: training.len(),
        });
    }

    let arity = training[0].arity();
    if arity == 0 {
        return Err(DefenseError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    if let Some(bad) = training.iter().find(|s| s.arity() != arity) {
        return Err(DefenseError::DimensionMismatch {
            expected: arity,
            actual: bad.arity(),
        });
    }

    let n = training.len() as f64;
    let params = (0..arity)
        .map(|i| {
            let mean = training.iter().map(|s| s.values()[i]).sum::<f64>() / n;
            let variance = training
                .iter()
                .map(|s| (s.values()[i] - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            ParameterStats::new(mean, variance.sqrt())
        })
        .collect();

    log::info!(
        "Baseline fitted: {} samples, {} parameters",
        training.len(),
        arity
    );

    Ok(Baseline::new(params, training.len()))
}
