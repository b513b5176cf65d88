//! Simulation Module - synthetic telemetry and attack scenarios
//!
//! ## Structure
//! - `types`: AttackKind, SimulatedEvent, ScenarioLog
//! - `generator`: seeded telemetry generator (normal + four attacks)
//! - `runner`: bounded, cancellable 1 Hz scenario runs

pub mod types;
pub mod generator;
pub mod runner;

pub use generator::{TelemetryGenerator, SENSOR_COUNT};
pub use runner::{AttackSimulator, SimulationHandle};
pub use types::{AttackKind, AttackTag, ScenarioLog, SimulatedEvent, SimulationStatus};
