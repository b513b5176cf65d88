//! GPS Spoofing Validator
//!
//! Two checks, reported together:
//! 1. implied vs declared speed between consecutive fixes (HIGH)
//! 2. altitude envelope, even on cold start (CRITICAL)

use serde::{Deserialize, Serialize};

use super::types::Severity;
use crate::constants::{DEFAULT_GPS_SPEED_THRESHOLD, MAX_ALTITUDE_M, MIN_ALTITUDE_M};
use crate::logic::geo::distance_meters;
use crate::logic::telemetry::GpsFix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpoofReason {
    ImpossibleSpeedChange { implied_mps: f64, declared_mps: f64 },
    ImpossibleAltitude { altitude_m: f64 },
}

impl SpoofReason {
    pub fn severity(&self) -> Severity {
        match self {
            SpoofReason::ImpossibleSpeedChange { .. } => Severity::High,
            SpoofReason::ImpossibleAltitude { .. } => Severity::Critical,
        }
    }

    pub fn description(&self) -> String {
        match self {
            SpoofReason::ImpossibleSpeedChange { implied_mps, declared_mps } => format!(
                "Impossible speed change detected (implied {:.1} m/s, declared {:.1} m/s)",
                implied_mps, declared_mps
            ),
            SpoofReason::ImpossibleAltitude { altitude_m } => {
                format!("Impossible altitude detected ({:.1} m)", altitude_m)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsCheck {
    pub is_spoofed: bool,
    /// Max severity over `reasons`
    pub severity: Option<Severity>,
    /// Speed reason first, then altitude
    pub reasons: Vec<SpoofReason>,
}

impl GpsCheck {
    pub fn reason(&self) -> Option<String> {
        if self.reasons.is_empty() {
            return None;
        }
        Some(
            self.reasons
                .iter()
                .map(SpoofReason::description)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Check a fix against the most recent prior fix (if any).
///
/// The speed check is skipped when elapsed time is not positive.
/// NaN coordinates or speeds count as spoofed.
pub fn check_gps(fix: &GpsFix, prior: Option<&GpsFix>, speed_tolerance_mps: f64) -> GpsCheck {
    let mut reasons = Vec::new();

    if let Some(prior) = prior {
        let elapsed_secs = (fix.timestamp - prior.timestamp).num_milliseconds() as f64 / 1000.0;
        if elapsed_secs > 0.0 {
            let distance = distance_meters(prior.latitude, prior.longitude, fix.latitude, fix.longitude);
            let implied = distance / elapsed_secs;
            let gap = (implied - fix.speed).abs();
            if gap.is_nan() || gap > speed_tolerance_mps {
                reasons.push(SpoofReason::ImpossibleSpeedChange {
                    implied_mps: implied,
                    declared_mps: fix.speed,
                });
            }
        }
    }

    if !(MIN_ALTITUDE_M..=MAX_ALTITUDE_M).contains(&fix.altitude) {
        reasons.push(SpoofReason::ImpossibleAltitude {
            altitude_m: fix.altitude,
        });
    }

    GpsCheck {
        is_spoofed: !reasons.is_empty(),
        severity: reasons.iter().map(SpoofReason::severity).max(),
        reasons,
    }
}

/// Check with the default speed tolerance
pub fn check_gps_default(fix: &GpsFix, prior: Option<&GpsFix>) -> GpsCheck {
    check_gps(fix, prior, DEFAULT_GPS_SPEED_THRESHOLD)
}
