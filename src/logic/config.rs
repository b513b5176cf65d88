//! Detection Configuration
//!
//! Runtime-adjustable settings read by the monitor at every call.
//! External layers write through [`SharedConfig::update`].

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{DefenseError, DefenseResult};

// ============================================================================
// SENSITIVITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::Low => "low",
            Sensitivity::Medium => "medium",
            Sensitivity::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Sensitivity::Low),
            "medium" => Some(Sensitivity::Medium),
            "high" => Some(Sensitivity::High),
            _ => None,
        }
    }

    /// Multiplier applied to the configured z-score threshold.
    /// Higher sensitivity = lower threshold = more alerts.
    pub fn threshold_factor(&self) -> f64 {
        match self {
            Sensitivity::Low => 1.2,
            Sensitivity::Medium => 1.0,
            Sensitivity::High => 0.8,
        }
    }
}

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseConfig {
    /// Z-score threshold before sensitivity scaling
    pub anomaly_threshold: f64,

    /// Tolerated |implied - declared| GPS speed (m/s)
    pub gps_speed_threshold_mps: f64,

    /// Ring buffer size of the detector
    pub data_window_size: usize,

    pub detection_sensitivity: Sensitivity,

    /// Dispatch threats to the response engine automatically
    pub auto_response_enabled: bool,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            anomaly_threshold: constants::DEFAULT_ANOMALY_THRESHOLD,
            gps_speed_threshold_mps: constants::DEFAULT_GPS_SPEED_THRESHOLD,
            data_window_size: constants::DEFAULT_WINDOW_SIZE,
            detection_sensitivity: Sensitivity::Medium,
            auto_response_enabled: true,
        }
    }
}

impl DefenseConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let detection_sensitivity = constants::get_sensitivity()
            .and_then(|s| {
                let parsed = Sensitivity::from_str(&s);
                if parsed.is_none() {
                    log::warn!("Unknown DEFENSE_SENSITIVITY '{}', using medium", s);
                }
                parsed
            })
            .unwrap_or_default();

        Self {
            anomaly_threshold: constants::get_anomaly_threshold(),
            gps_speed_threshold_mps: constants::get_gps_speed_threshold(),
            data_window_size: constants::get_window_size(),
            detection_sensitivity,
            auto_response_enabled: constants::is_auto_response_enabled(),
        }
    }

    pub fn validate(&self) -> DefenseResult<()> {
        if !self.anomaly_threshold.is_finite() || self.anomaly_threshold <= 0.0 {
            return Err(DefenseError::InvalidConfig(format!(
                "anomaly_threshold must be a positive number, got {}",
                self.anomaly_threshold
            )));
        }
        if !self.gps_speed_threshold_mps.is_finite() || self.gps_speed_threshold_mps <= 0.0 {
            return Err(DefenseError::InvalidConfig(format!(
                "gps_speed_threshold_mps must be a positive number, got {}",
                self.gps_speed_threshold_mps
            )));
        }
        if self.data_window_size == 0 {
            return Err(DefenseError::InvalidConfig(
                "data_window_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Threshold actually used by the detector
    pub fn effective_threshold(&self) -> f64 {
        self.anomaly_threshold * self.detection_sensitivity.threshold_factor()
    }
}

// ============================================================================
// SHARED HANDLE
// ============================================================================

/// Cloneable read/write handle shared between the core and external layers
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<DefenseConfig>>,
}

impl SharedConfig {
    pub fn new(config: DefenseConfig) -> DefenseResult<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(config)),
        })
    }

    pub fn snapshot(&self) -> DefenseConfig {
        self.inner.read().clone()
    }

    /// Replace the configuration; rejected configs leave the current one intact
    pub fn update(&self, config: DefenseConfig) -> DefenseResult<()> {
        config.validate()?;
        log::info!(
            "Detection config updated: threshold={:.2} ({}), gps_tolerance={:.1} m/s, window={}, auto_response={}",
            config.anomaly_threshold,
            config.detection_sensitivity.as_str(),
            config.gps_speed_threshold_mps,
            config.data_window_size,
            config.auto_response_enabled
        );
        *self.inner.write() = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DefenseConfig::default();
        assert_eq!(config.anomaly_threshold, 2.5);
        assert_eq!(config.gps_speed_threshold_mps, 50.0);
        assert_eq!(config.data_window_size, 50);
        assert_eq!(config.detection_sensitivity, Sensitivity::Medium);
        assert!(config.auto_response_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sensitivity_scales_threshold() {
        let mut config = DefenseConfig::default();
        assert_eq!(config.effective_threshold(), 2.5);

        config.detection_sensitivity = Sensitivity::High;
        assert!(config.effective_threshold() < 2.5);

        config.detection_sensitivity = Sensitivity::Low;
        assert!(config.effective_threshold() > 2.5);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad_threshold = DefenseConfig {
            anomaly_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(bad_threshold.validate(), Err(DefenseError::InvalidConfig(_))));

        let bad_window = DefenseConfig {
            data_window_size: 0,
            ..Default::default()
        };
        assert!(bad_window.validate().is_err());
    }

    #[test]
    fn test_shared_update_keeps_old_on_error() {
        let shared = SharedConfig::default();
        let bad = DefenseConfig {
            gps_speed_threshold_mps: -1.0,
            ..Default::default()
        };
        assert!(shared.update(bad).is_err());
        assert_eq!(shared.snapshot(), DefenseConfig::default());

        let good = DefenseConfig {
            anomaly_threshold: 3.0,
            ..Default::default()
        };
        shared.update(good).unwrap();
        assert_eq!(shared.snapshot().anomaly_threshold, 3.0);
    }

    #[test]
    fn test_config_wire_names() {
        let json = serde_json::to_value(DefenseConfig::default()).unwrap();
        assert_eq!(json["detection_sensitivity"], "medium");
        assert_eq!(json["data_window_size"], 50);
    }
}
