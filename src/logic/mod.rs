//! Logic Module - Detection & Response Engines
//!
//! ## Layout
//! - `geo` - great-circle distance
//! - `telemetry` - inbound data types (Sample, GpsFix, ControlFrame)
//! - `baseline` - baseline fitting
//! - `model` - anomaly detector + ring buffer
//! - `threat` - threat types and domain validators
//! - `response` - defense response state machine
//! - `simulation` - synthetic telemetry / attack generator
//! - `monitor` - end-to-end telemetry pipeline

pub mod config;
pub mod events;
pub mod geo;
pub mod telemetry;

pub mod baseline;
pub mod model;
pub mod threat;
pub mod response;
pub mod simulation;
pub mod monitor;
