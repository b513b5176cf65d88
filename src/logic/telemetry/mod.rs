//! Telemetry Module
//!
//! Inbound data contracts: sensor samples, GPS fixes, control frames.
//! NO detection logic here - data structures only.

pub mod types;

pub use types::{CommandSource, ControlFrame, GpsFix, Sample, TelemetryFrame};
