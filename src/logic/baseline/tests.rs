use super::fit::{fit, MIN_TRAINING_SAMPLES};
use super::types::Baseline;
use crate::error::DefenseError;
use crate::logic::telemetry::Sample;

fn samples(rows: &[&[f64]]) -> Vec<Sample> {
    rows.iter().map(|r| Sample::new(r.to_vec())).collect()
}

#[test]
fn test_fit_mean_and_unbiased_std() {
    let training = samples(&[&[2.0, 10.0], &[4.0, 10.0], &[6.0, 10.0]]);
    let baseline = fit(&training).unwrap();

    assert_eq!(baseline.arity(), 2);
    assert_eq!(baseline.sample_count(), 3);

    let p0 = baseline.params()[0];
    assert!((p0.mean - 4.0).abs() < 1e-12);
    // variance = (4 + 0 + 4) / (3 - 1) = 4
    assert!((p0.std_dev - 2.0).abs() < 1e-12);
}

#[test]
fn test_zero_std_substituted_with_one() {
    let training = samples(&[&[5.0], &[5.0], &[5.0]]);
    let baseline = fit(&training).unwrap();

    assert_eq!(baseline.params()[0].std_dev, 1.0);
    assert_eq!(baseline.params()[0].z_score(7.0), 2.0);
}

#[test]
fn test_reject_insufficient_data() {
    let result = fit(&samples(&[&[1.0, 2.0]]));
    match result {
        Err(DefenseError::InsufficientData { required, actual }) => {
            assert_eq!(required, MIN_TRAINING_SAMPLES);
            assert_eq!(actual, 1);
        }
        other => panic!("Expected InsufficientData, got {:?}", other),
    }

    assert!(fit(&[]).is_err());
}

#[test]
fn test_reject_ragged_training_set() {
    let result = fit(&samples(&[&[1.0, 2.0], &[1.0, 2.0, 3.0]]));
    assert_eq!(
        result.unwrap_err(),
        DefenseError::DimensionMismatch { expected: 2, actual: 3 }
    );
}

#[test]
fn test_loaded_baseline_keeps_nonzero_std() {
    let json = r#"{
        "params": [{"mean": 5.0, "std_dev": 0.0}, {"mean": 1.0, "std_dev": 0.5}],
        "samples": 10,
        "created_at": "2026-01-01T00:00:00Z"
    }"#;
    let baseline: Baseline = serde_json::from_str(json).unwrap();

    assert_eq!(baseline.params()[0].std_dev, 1.0);
    assert_eq!(baseline.params()[1].std_dev, 0.5);
    assert!(baseline.params()[0].z_score(5.5).is_finite());
}
