//! Baseline Module - Statistical fingerprint of normal operation
//!
//! Fitted once from a labeled "normal" training set, read-only afterwards.
//!
//! ## Structure
//! - `types`: Baseline + per-parameter stats
//! - `fit`: column-wise mean / sample standard deviation

pub mod types;
pub mod fit;

#[cfg(test)]
mod tests;

pub use types::{Baseline, ParameterStats};
pub use fit::{fit, MIN_TRAINING_SAMPLES};
