//! Threat Rules & Constants
//!
//! Confidence values attached to validator-raised threats and the
//! severity mapping for statistical anomalies.
//! NO check logic here - constants only.

use super::types::Severity;

/// Confidence attached to a GPS spoofing threat
pub const GPS_SPOOF_CONFIDENCE: f64 = 0.95;

/// Confidence attached to a control hijacking threat
pub const CONTROL_HIJACK_CONFIDENCE: f64 = 0.98;

/// Confidence attached to an out-of-envelope sensor threat
pub const DATA_TAMPER_CONFIDENCE: f64 = 0.92;

/// Anomalies at or above this confidence are raised as HIGH, below as MEDIUM
pub const ANOMALY_HIGH_CONFIDENCE: f64 = 0.8;

/// Severity of an anomaly threat given the detector confidence
pub fn anomaly_severity(confidence: f64) -> Severity {
    if confidence < ANOMALY_HIGH_CONFIDENCE {
        Severity::Medium
    } else {
        Severity::High
    }
}
