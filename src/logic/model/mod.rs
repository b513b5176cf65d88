//! Model Module - Statistical anomaly detection
//!
//! Classification kept apart from data collection and response.

pub mod buffer;
pub mod detector;
pub mod types;

// Re-export common types
pub use buffer::{BufferStatus, RingBuffer};
pub use detector::AnomalyDetector;
pub use types::{BufferedSample, DetectionResult, ParameterDetail};
