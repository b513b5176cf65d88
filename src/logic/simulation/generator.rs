//! Telemetry Generator
//!
//! Synthetic vehicle telemetry on a logical 1 Hz clock. Normal frames
//! follow a coherent flight track, so consecutive fixes agree with their
//! declared speed; attack frames corrupt exactly one subsystem.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{AttackKind, AttackTag, SimulatedEvent};
use crate::constants::SIMULATION_TICK_MS;
use crate::logic::telemetry::{CommandSource, ControlFrame, GpsFix, Sample, TelemetryFrame};
use crate::logic::threat::{Severity, ThreatType};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Home position (lower Manhattan)
const HOME_LAT: f64 = 40.7128;
const HOME_LON: f64 = -74.0060;

/// Meters per degree of latitude on the Haversine sphere
const METERS_PER_DEG: f64 = 111_194.93;

/// Position noise per fix (meters, each axis)
const POSITION_JITTER_M: f64 = 1.0;

/// (base, uniform span) for temperature, pressure, humidity, voltage, current
const SENSOR_PROFILE: [(f64, f64); 5] = [
    (50.0, 10.0),
    (1013.0, 5.0),
    (45.0, 10.0),
    (12.5, 0.5),
    (2.1, 0.2),
];

pub const SENSOR_COUNT: usize = SENSOR_PROFILE.len();

/// Values no healthy sensor reports
const TAMPERED_SENSORS: [f64; SENSOR_COUNT] = [150.0, 500.0, -10.0, 25.0, 0.1];

/// Proportional jitter window for subtle anomalies (±15%)
const ANOMALY_JITTER: f64 = 0.3;

const NOMINAL_COMMANDS: [u8; 4] = [0x01, 0x02, 0x03, 0x04];
const HOSTILE_COMMANDS: [u8; 4] = [0xFF, 0xEE, 0xDD, 0xCC];
const HOSTILE_CHECKSUM: u32 = 99;

// ============================================================================
// GENERATOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct TelemetryGenerator {
    rng: StdRng,
    vehicle_id: String,
    clock: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    heading_rad: f64,
}

impl TelemetryGenerator {
    pub fn new(vehicle_id: &str) -> Self {
        Self::from_rng(vehicle_id, StdRng::from_entropy())
    }

    /// Reproducible stream
    pub fn with_seed(vehicle_id: &str, seed: u64) -> Self {
        Self::from_rng(vehicle_id, StdRng::seed_from_u64(seed))
    }

    fn from_rng(vehicle_id: &str, mut rng: StdRng) -> Self {
        let heading_rad = rng.gen_range(0.0..std::f64::consts::TAU);
        Self {
            rng,
            vehicle_id: vehicle_id.to_string(),
            clock: Utc::now(),
            latitude: HOME_LAT,
            longitude: HOME_LON,
            heading_rad,
        }
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// Advance the logical clock by one tick and return the new time
    fn advance_clock(&mut self) -> DateTime<Utc> {
        self.clock += Duration::milliseconds(SIMULATION_TICK_MS as i64);
        self.clock
    }

    fn normal_sensors(&mut self) -> Vec<f64> {
        SENSOR_PROFILE
            .iter()
            .map(|&(base, span)| base + self.rng.gen::<f64>() * span)
            .collect()
    }

    /// Move along the track for one tick at the declared speed
    fn next_fix(&mut self, timestamp: DateTime<Utc>) -> GpsFix {
        let speed = 15.0 + self.rng.gen::<f64>() * 5.0;
        let altitude = 100.0 + self.rng.gen::<f64>() * 50.0;
        self.heading_rad += self.rng.gen_range(-0.1..0.1);

        let dt = SIMULATION_TICK_MS as f64 / 1000.0;
        let north_m = speed * dt * self.heading_rad.cos();
        let east_m = speed * dt * self.heading_rad.sin();
        self.latitude += north_m / METERS_PER_DEG;
        self.longitude += east_m / (METERS_PER_DEG * self.latitude.to_radians().cos());

        let jitter_n = self.rng.gen_range(-POSITION_JITTER_M..POSITION_JITTER_M);
        let jitter_e = self.rng.gen_range(-POSITION_JITTER_M..POSITION_JITTER_M);

        GpsFix {
            latitude: self.latitude + jitter_n / METERS_PER_DEG,
            longitude: self.longitude
                + jitter_e / (METERS_PER_DEG * self.latitude.to_radians().cos()),
            altitude,
            speed,
            timestamp,
        }
    }

    /// One clean telemetry frame
    pub fn generate_normal(&mut self) -> TelemetryFrame {
        let timestamp = self.advance_clock();
        let gps = self.next_fix(timestamp);
        let sensors = Sample::at(self.normal_sensors(), timestamp);
        let mut control =
            ControlFrame::signed(NOMINAL_COMMANDS.to_vec(), CommandSource::GroundControl);
        control.timestamp = timestamp;

        TelemetryFrame {
            vehicle_id: self.vehicle_id.clone(),
            captured_at: timestamp,
            gps,
            sensors,
            control,
        }
    }

    /// `n` independent sensor vectors for baseline fitting
    pub fn generate_training_data(&mut self, n: usize) -> Vec<Sample> {
        (0..n)
            .map(|_| Sample::at(self.normal_sensors(), self.clock))
            .collect()
    }

    pub fn simulate_gps_spoofing(&mut self) -> SimulatedEvent {
        let mut frame = self.generate_normal();
        frame.gps = GpsFix {
            latitude: 0.0,
            longitude: 0.0,
            altitude: -1000.0,
            speed: 500.0,
            timestamp: frame.captured_at,
        };
        tagged(frame, ThreatType::GpsSpoofing, Severity::Critical)
    }

    pub fn simulate_control_hijacking(&mut self) -> SimulatedEvent {
        let mut frame = self.generate_normal();
        frame.control = ControlFrame {
            commands: HOSTILE_COMMANDS.to_vec(),
            source: CommandSource::Other("UNKNOWN_SOURCE".to_string()),
            timestamp: frame.captured_at,
            checksum: HOSTILE_CHECKSUM,
        };
        tagged(frame, ThreatType::ControlHijacking, Severity::Critical)
    }

    pub fn simulate_data_tampering(&mut self) -> SimulatedEvent {
        let mut frame = self.generate_normal();
        frame.sensors = Sample::at(TAMPERED_SENSORS.to_vec(), frame.captured_at);
        tagged(frame, ThreatType::DataTampering, Severity::High)
    }

    pub fn simulate_anomalies(&mut self) -> SimulatedEvent {
        let mut frame = self.generate_normal();
        let drifted = frame
            .sensors
            .values()
            .iter()
            .map(|&v| v + (self.rng.gen::<f64>() - 0.5) * v * ANOMALY_JITTER)
            .collect();
        frame.sensors = Sample::at(drifted, frame.captured_at);
        tagged(frame, ThreatType::AnomalyDetected, Severity::Medium)
    }

    /// One event of the requested kind
    pub fn generate(&mut self, kind: AttackKind) -> SimulatedEvent {
        match kind {
            AttackKind::GpsSpoofing => self.simulate_gps_spoofing(),
            AttackKind::ControlHijacking => self.simulate_control_hijacking(),
            AttackKind::DataTampering => self.simulate_data_tampering(),
            AttackKind::Anomalies => self.simulate_anomalies(),
            AttackKind::Normal => SimulatedEvent {
                tick: 0,
                frame: self.generate_normal(),
                attack: None,
            },
        }
    }
}

fn tagged(frame: TelemetryFrame, attack_type: ThreatType, severity: Severity) -> SimulatedEvent {
    SimulatedEvent {
        tick: 0,
        frame,
        attack: Some(AttackTag {
            attack_type,
            severity,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::{check_control, check_gps_default, SensorEnvelope};

    #[test]
    fn test_normal_frames_are_clean() {
        let mut generator = TelemetryGenerator::with_seed("drone-001", 7);
        let envelope = SensorEnvelope::default();
        let mut prior: Option<GpsFix> = None;

        for _ in 0..200 {
            let frame = generator.generate_normal();
            assert_eq!(frame.sensors.arity(), SENSOR_COUNT);
            assert!(!envelope.check(&frame.sensors).unwrap().is_tampered);
            assert!(!check_control(&frame.control).is_hijacked);

            let gps = check_gps_default(&frame.gps, prior.as_ref());
            assert!(!gps.is_spoofed, "normal track flagged: {:?}", gps.reason());
            prior = Some(frame.gps);
        }
    }

    #[test]
    fn test_logical_clock_ticks_one_second() {
        let mut generator = TelemetryGenerator::with_seed("drone-001", 1);
        let a = generator.generate_normal();
        let b = generator.generate_normal();
        assert_eq!((b.captured_at - a.captured_at).num_milliseconds(), 1000);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = TelemetryGenerator::with_seed("drone-001", 42);
        let mut b = TelemetryGenerator::with_seed("drone-001", 42);
        assert_eq!(
            a.generate_training_data(10)
                .iter()
                .map(|s| s.values().to_vec())
                .collect::<Vec<_>>(),
            b.generate_training_data(10)
                .iter()
                .map(|s| s.values().to_vec())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_training_data_shape() {
        let mut generator = TelemetryGenerator::with_seed("drone-001", 3);
        let data = generator.generate_training_data(25);
        assert_eq!(data.len(), 25);
        assert!(data.iter().all(|s| s.arity() == SENSOR_COUNT));
    }

    #[test]
    fn test_attack_frames_corrupt_their_subsystem() {
        let mut generator = TelemetryGenerator::with_seed("drone-001", 9);

        let spoof = generator.simulate_gps_spoofing();
        assert_eq!(spoof.frame.gps.altitude, -1000.0);
        assert!(check_gps_default(&spoof.frame.gps, None).is_spoofed);
        assert_eq!(spoof.attack.unwrap().severity, Severity::Critical);

        let hijack = generator.simulate_control_hijacking();
        assert!(check_control(&hijack.frame.control).is_hijacked);
        assert_eq!(hijack.attack.unwrap().attack_type, ThreatType::ControlHijacking);

        let tamper = generator.simulate_data_tampering();
        assert_eq!(tamper.frame.sensors.values(), &TAMPERED_SENSORS);
        assert_eq!(tamper.attack.unwrap().severity, Severity::High);

        let anomaly = generator.simulate_anomalies();
        for (value, &(base, span)) in anomaly.frame.sensors.values().iter().zip(&SENSOR_PROFILE) {
            let hi = (base + span) * 1.15;
            let lo = base * 0.85;
            assert!(*value >= lo && *value <= hi, "{} outside [{}, {}]", value, lo, hi);
        }
        assert_eq!(anomaly.attack.unwrap().severity, Severity::Medium);
    }

    #[test]
    fn test_normal_kind_has_no_tag() {
        let mut generator = TelemetryGenerator::with_seed("drone-001", 5);
        assert!(generator.generate(AttackKind::Normal).attack.is_none());
    }
}
