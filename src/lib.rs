//! Sky Shield Core - Vehicle Defense Pipeline
//!
//! Detection and response for autonomous vehicles:
//! - `logic::baseline` - statistical fingerprint of normal operation
//! - `logic::model` - z-score anomaly detector + ring buffer
//! - `logic::threat` - GPS, control and sensor validators
//! - `logic::response` - threat response state machine
//! - `logic::simulation` - synthetic telemetry and attack streams
//! - `logic::monitor` - telemetry pipeline tying it all together

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{DefenseError, DefenseResult};
