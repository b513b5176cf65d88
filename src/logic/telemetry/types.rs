//! Telemetry Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// SAMPLE
// ============================================================================

/// Ordered parameter readings captured at one instant.
///
/// Arity is fixed per session and checked against the baseline at
/// classification time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    values: Vec<f64>,
    pub captured_at: DateTime<Utc>,
}

impl Sample {
    pub fn new(values: Vec<f64>) -> Self {
        Self::at(values, Utc::now())
    }

    pub fn at(values: Vec<f64>, captured_at: DateTime<Utc>) -> Self {
        Self { values, captured_at }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn arity(&self) -> usize {
        self.values.len()
    }
}

// ============================================================================
// GPS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    /// Degrees
    pub latitude: f64,
    /// Degrees
    pub longitude: f64,
    /// Meters above sea level
    pub altitude: f64,
    /// Declared ground speed (m/s)
    pub speed: f64,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// CONTROL
// ============================================================================

/// Origin of a control frame. Unknown origins are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommandSource {
    GroundControl,
    OnboardAi,
    EmergencyOverride,
    Other(String),
}

impl CommandSource {
    pub fn as_str(&self) -> &str {
        match self {
            CommandSource::GroundControl => "GROUND_CONTROL",
            CommandSource::OnboardAi => "ONBOARD_AI",
            CommandSource::EmergencyOverride => "EMERGENCY_OVERRIDE",
            CommandSource::Other(name) => name,
        }
    }

    /// Sources allowed to issue commands
    pub fn is_authorized(&self) -> bool {
        !matches!(self, CommandSource::Other(_))
    }
}

impl From<&str> for CommandSource {
    fn from(s: &str) -> Self {
        match s {
            "GROUND_CONTROL" => CommandSource::GroundControl,
            "ONBOARD_AI" => CommandSource::OnboardAi,
            "EMERGENCY_OVERRIDE" => CommandSource::EmergencyOverride,
            other => CommandSource::Other(other.to_string()),
        }
    }
}

impl From<String> for CommandSource {
    fn from(s: String) -> Self {
        CommandSource::from(s.as_str())
    }
}

impl From<CommandSource> for String {
    fn from(source: CommandSource) -> Self {
        source.as_str().to_string()
    }
}

impl std::fmt::Display for CommandSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlFrame {
    pub commands: Vec<u8>,
    pub source: CommandSource,
    pub timestamp: DateTime<Utc>,
    /// Declared checksum; wider than a byte so corrupted values survive intact
    pub checksum: u32,
}

impl ControlFrame {
    /// Build a frame whose checksum matches its commands
    pub fn signed(commands: Vec<u8>, source: CommandSource) -> Self {
        let checksum = command_checksum(&commands);
        Self {
            commands,
            source,
            timestamp: Utc::now(),
            checksum,
        }
    }
}

/// sum(commands) mod 256
pub fn command_checksum(commands: &[u8]) -> u32 {
    commands
        .iter()
        .fold(0u32, |acc, &b| acc.wrapping_add(b as u32))
        % 256
}

// ============================================================================
// FRAME
// ============================================================================

/// One full telemetry packet from a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub vehicle_id: String,
    pub captured_at: DateTime<Utc>,
    pub gps: GpsFix,
    pub sensors: Sample,
    pub control: ControlFrame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_wraps() {
        assert_eq!(command_checksum(&[0x01, 0x02, 0x03, 0x04]), 10);
        assert_eq!(command_checksum(&[0xFF, 0xEE, 0xDD, 0xCC]), 150);
        assert_eq!(command_checksum(&[]), 0);
    }

    #[test]
    fn test_source_round_trip_names() {
        assert_eq!(CommandSource::from("ONBOARD_AI"), CommandSource::OnboardAi);
        assert_eq!(
            CommandSource::from("UNKNOWN_SOURCE"),
            CommandSource::Other("UNKNOWN_SOURCE".to_string())
        );

        let json = serde_json::to_string(&CommandSource::EmergencyOverride).unwrap();
        assert_eq!(json, "\"EMERGENCY_OVERRIDE\"");
        let back: CommandSource = serde_json::from_str("\"rogue\"").unwrap();
        assert!(!back.is_authorized());
    }

    #[test]
    fn test_signed_frame() {
        let frame = ControlFrame::signed(vec![10, 20, 30], CommandSource::GroundControl);
        assert_eq!(frame.checksum, 60);
    }
}
