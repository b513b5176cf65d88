//! Error handling

use thiserror::Error;

pub type DefenseResult<T> = Result<T, DefenseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefenseError {
    /// Not enough training data to compute a sample standard deviation
    #[error("insufficient data: need at least {required} samples, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Sample arity does not match the baseline (or training set) arity
    #[error("dimension mismatch: expected {expected} parameters, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Recovery errors
    #[error("no recovery plan has been issued")]
    NoRecoveryPlan,

    #[error("recovery steps not confirmed: {missing:?}")]
    RecoveryIncomplete { missing: Vec<String> },

    #[error("recovery requires operator approval")]
    OperatorApprovalRequired,

    // Simulation errors
    #[error("a simulation is already running: {0}")]
    SimulationBusy(String),

    #[error("simulation task aborted: {0}")]
    SimulationAborted(String),
}
