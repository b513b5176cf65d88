//! Threat Module
//!
//! Threat records plus the domain validators that raise them.
//!
//! ## Structure
//! - `types`: ThreatType, Severity, Threat
//! - `rules`: confidences and severity mapping
//! - `gps`: GPS spoofing validator
//! - `control`: control integrity validator
//! - `sensors`: sensor envelope validator (data tampering)

pub mod types;
pub mod rules;
pub mod gps;
pub mod control;
pub mod sensors;

// Re-export main types for convenience
pub use types::{Severity, Threat, ThreatType};

pub use gps::{check_gps, check_gps_default, GpsCheck, SpoofReason};
pub use control::{check_control, ControlCheck, HijackReason};
pub use sensors::{SensorEnvelope, SensorRange, TamperCheck};
