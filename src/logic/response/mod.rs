//! Response Module - Automated Threat Response
//!
//! # Components
//! - `types.rs`: action codes, posture, recovery plan
//! - `engine.rs`: response state machine

pub mod engine;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::DefenseEngine;
pub use types::{
    FailoverProfile, HealthSnapshot, RecoveryConfirmation, RecoveryPlan, RecoveryStep, Response,
    ResponseAction, SystemPosture, SystemStatus,
};
