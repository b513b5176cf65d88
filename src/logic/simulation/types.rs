//! Simulation Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::telemetry::TelemetryFrame;
use crate::logic::threat::{Severity, ThreatType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttackKind {
    GpsSpoofing,
    ControlHijacking,
    DataTampering,
    Anomalies,
    /// Clean telemetry, also used for unrecognized scenario names
    Normal,
}

impl AttackKind {
    /// Scenarios offered to operators
    pub const SCENARIOS: [AttackKind; 4] = [
        AttackKind::GpsSpoofing,
        AttackKind::ControlHijacking,
        AttackKind::DataTampering,
        AttackKind::Anomalies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttackKind::GpsSpoofing => "GPS_SPOOFING",
            AttackKind::ControlHijacking => "CONTROL_HIJACKING",
            AttackKind::DataTampering => "DATA_TAMPERING",
            AttackKind::Anomalies => "ANOMALIES",
            AttackKind::Normal => "NORMAL",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "GPS_SPOOFING" => AttackKind::GpsSpoofing,
            "CONTROL_HIJACKING" => AttackKind::ControlHijacking,
            "DATA_TAMPERING" => AttackKind::DataTampering,
            "ANOMALIES" | "ANOMALY_DETECTED" => AttackKind::Anomalies,
            _ => AttackKind::Normal,
        }
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ground truth attached to a generated attack frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackTag {
    pub attack_type: ThreatType,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedEvent {
    /// 1-based tick within the run (0 outside a run)
    pub tick: u64,
    pub frame: TelemetryFrame,
    pub attack: Option<AttackTag>,
}

/// Result of one bounded simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioLog {
    pub kind: AttackKind,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Oldest first; capped, see `dropped_events`
    pub events: Vec<SimulatedEvent>,
    pub dropped_events: usize,
    pub cancelled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationStatus {
    pub is_running: bool,
    pub current_scenario: Option<AttackKind>,
    pub available_scenarios: Vec<AttackKind>,
}
