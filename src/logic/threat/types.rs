//! Threat Types
//!
//! Core types for threat records.
//! NO logic here - data structures only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// THREAT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatType {
    GpsSpoofing,
    ControlHijacking,
    DataTampering,
    AnomalyDetected,
    /// Any type the core does not know; answered with a generic response
    #[serde(other)]
    Unclassified,
}

impl ThreatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatType::GpsSpoofing => "GPS_SPOOFING",
            ThreatType::ControlHijacking => "CONTROL_HIJACKING",
            ThreatType::DataTampering => "DATA_TAMPERING",
            ThreatType::AnomalyDetected => "ANOMALY_DETECTED",
            ThreatType::Unclassified => "UNCLASSIFIED",
        }
    }
}

impl std::fmt::Display for ThreatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

/// Ordered: Low < Medium < High < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// THREAT
// ============================================================================

/// A classified threat. Handed to the response engine once, then to the
/// external store; the core keeps no copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub threat_type: ThreatType,
    pub severity: Severity,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub detail: serde_json::Value,
}

impl Threat {
    pub fn new(
        threat_type: ThreatType,
        severity: Severity,
        confidence: f64,
        detail: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            threat_type,
            severity,
            confidence: confidence.clamp(0.0, 1.0),
            timestamp: Utc::now(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::Low.max(Severity::Critical), Severity::Critical);
    }

    #[test]
    fn test_unknown_type_deserializes_to_unclassified() {
        let t: ThreatType = serde_json::from_str("\"JAMMING\"").unwrap();
        assert_eq!(t, ThreatType::Unclassified);

        let t: ThreatType = serde_json::from_str("\"GPS_SPOOFING\"").unwrap();
        assert_eq!(t, ThreatType::GpsSpoofing);
    }

    #[test]
    fn test_threat_wire_shape() {
        let threat = Threat::new(
            ThreatType::ControlHijacking,
            Severity::Critical,
            1.7,
            serde_json::json!({ "reason": "test" }),
        );
        assert_eq!(threat.confidence, 1.0);

        let json = serde_json::to_value(&threat).unwrap();
        assert_eq!(json["type"], "CONTROL_HIJACKING");
        assert_eq!(json["severity"], "CRITICAL");
    }
}
