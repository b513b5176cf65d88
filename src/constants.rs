//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Default z-score threshold above which a sample is anomalous
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.5;

/// Default tolerated gap between implied and declared GPS speed (m/s)
pub const DEFAULT_GPS_SPEED_THRESHOLD: f64 = 50.0;

/// Default ring buffer size for recent samples
pub const DEFAULT_WINDOW_SIZE: usize = 50;

/// Mean Earth radius used by the Haversine formula (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Altitude envelope (meters); anything outside is physically implausible
pub const MIN_ALTITUDE_M: f64 = -500.0;
pub const MAX_ALTITUDE_M: f64 = 50_000.0;

/// Simulator cadence (milliseconds)
pub const SIMULATION_TICK_MS: u64 = 1_000;

/// Upper bound on events kept in one scenario log (1 hour at 1 Hz)
pub const MAX_SCENARIO_EVENTS: usize = 3_600;

/// Default simulated run length for the demo binary (milliseconds)
pub const DEFAULT_SIMULATION_DURATION_MS: u64 = 5_000;

/// Number of generated samples used to train the demo baseline
pub const DEFAULT_TRAINING_SAMPLES: usize = 1_000;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Sky-Shield";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get anomaly threshold from environment or use default
pub fn get_anomaly_threshold() -> f64 {
    env_parse("DEFENSE_ANOMALY_THRESHOLD").unwrap_or(DEFAULT_ANOMALY_THRESHOLD)
}

/// Get GPS speed tolerance from environment or use default
pub fn get_gps_speed_threshold() -> f64 {
    env_parse("DEFENSE_GPS_SPEED_THRESHOLD").unwrap_or(DEFAULT_GPS_SPEED_THRESHOLD)
}

/// Get detector window size from environment or use default
pub fn get_window_size() -> usize {
    env_parse("DEFENSE_WINDOW_SIZE").unwrap_or(DEFAULT_WINDOW_SIZE)
}

/// Get raw sensitivity label from environment ("low" | "medium" | "high")
pub fn get_sensitivity() -> Option<String> {
    std::env::var("DEFENSE_SENSITIVITY").ok()
}

/// Check if automated response is enabled
pub fn is_auto_response_enabled() -> bool {
    std::env::var("DEFENSE_AUTO_RESPONSE")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}

/// Get simulated run length from environment or use default
pub fn get_simulation_duration_ms() -> u64 {
    env_parse("SIM_DURATION_MS").unwrap_or(DEFAULT_SIMULATION_DURATION_MS)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
