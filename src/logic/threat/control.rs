//! Control Integrity Validator
//!
//! Classifies control frames only; blocking execution is the
//! actuation layer's job.

use serde::{Deserialize, Serialize};

use super::types::Severity;
use crate::logic::telemetry::types::command_checksum;
use crate::logic::telemetry::ControlFrame;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HijackReason {
    IntegrityCheckFailed { expected: u32, actual: u32 },
    UnauthorizedSource { source: String },
}

impl HijackReason {
    pub fn severity(&self) -> Severity {
        match self {
            HijackReason::IntegrityCheckFailed { .. } => Severity::Critical,
            HijackReason::UnauthorizedSource { .. } => Severity::High,
        }
    }

    pub fn description(&self) -> String {
        match self {
            HijackReason::IntegrityCheckFailed { expected, actual } => format!(
                "Command integrity check failed (expected checksum {}, got {})",
                expected, actual
            ),
            HijackReason::UnauthorizedSource { source } => {
                format!("Unauthorized command source: {}", source)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlCheck {
    pub is_hijacked: bool,
    pub severity: Option<Severity>,
    pub reason: Option<HijackReason>,
}

/// Integrity first: a corrupted frame's declared source cannot be trusted,
/// so the source is only checked once the checksum matches.
pub fn check_control(frame: &ControlFrame) -> ControlCheck {
    let expected = command_checksum(&frame.commands);

    let reason = if frame.checksum != expected {
        Some(HijackReason::IntegrityCheckFailed {
            expected,
            actual: frame.checksum,
        })
    } else if !frame.source.is_authorized() {
        Some(HijackReason::UnauthorizedSource {
            source: frame.source.to_string(),
        })
    } else {
        None
    };

    ControlCheck {
        is_hijacked: reason.is_some(),
        severity: reason.as_ref().map(HijackReason::severity),
        reason,
    }
}
