//! Defense Monitor - end-to-end telemetry pipeline
//!
//! One frame in, threats and responses out:
//! 1. anomaly detection on the sensor vector
//! 2. sensor envelope (data tampering)
//! 3. GPS spoofing against the previous fix
//! 4. control integrity
//!
//! Frames are processed one at a time under the detector lock, so threats
//! reach the response engine in classification order.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::DefenseResult;
use crate::logic::baseline;
use crate::logic::config::SharedConfig;
use crate::logic::events::ThreatSink;
use crate::logic::model::{AnomalyDetector, BufferStatus, DetectionResult};
use crate::logic::response::{
    DefenseEngine, HealthSnapshot, RecoveryConfirmation, RecoveryPlan, Response,
};
use crate::logic::telemetry::{Sample, TelemetryFrame};
use crate::logic::threat::rules::{
    anomaly_severity, CONTROL_HIJACK_CONFIDENCE, DATA_TAMPER_CONFIDENCE, GPS_SPOOF_CONFIDENCE,
};
use crate::logic::threat::{
    check_control, check_gps, SensorEnvelope, Severity, Threat, ThreatType,
};

/// Outcome of one processed frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryReport {
    pub detection: DetectionResult,
    /// In classification order
    pub threats: Vec<Threat>,
    /// Empty when auto response is disabled
    pub responses: Vec<Response>,
}

impl TelemetryReport {
    pub fn is_clean(&self) -> bool {
        self.threats.is_empty()
    }
}

pub struct DefenseMonitor {
    config: SharedConfig,
    detector: Mutex<AnomalyDetector>,
    engine: DefenseEngine,
    envelope: SensorEnvelope,
    sink: Box<dyn ThreatSink>,
}

impl DefenseMonitor {
    pub fn new<S: ThreatSink + 'static>(config: SharedConfig, sink: S) -> Self {
        let snapshot = config.snapshot();
        Self {
            detector: Mutex::new(AnomalyDetector::new(
                snapshot.effective_threshold(),
                snapshot.data_window_size,
            )),
            config,
            engine: DefenseEngine::new(),
            envelope: SensorEnvelope::default(),
            sink: Box::new(sink),
        }
    }

    pub fn with_envelope(mut self, envelope: SensorEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    pub fn engine(&self) -> &DefenseEngine {
        &self.engine
    }

    /// Fit and load a baseline; the detector keeps its previous one on error
    pub fn train_baseline(&self, samples: &[Sample]) -> DefenseResult<()> {
        let fitted = baseline::fit(samples)?;
        self.detector.lock().set_baseline(fitted);
        Ok(())
    }

    pub fn has_baseline(&self) -> bool {
        self.detector.lock().baseline().is_some()
    }

    pub fn buffer_status(&self) -> BufferStatus {
        self.detector.lock().buffer_status()
    }

    /// Run every check on one frame.
    ///
    /// A sensor vector of the wrong arity is raised as DATA_TAMPERING and the
    /// GPS and control checks still run; the mismatch is returned only after
    /// every threat has been dispatched.
    pub fn process_telemetry(&self, frame: &TelemetryFrame) -> DefenseResult<TelemetryReport> {
        let config = self.config.snapshot();
        let mut detector = self.detector.lock();
        detector.set_threshold(config.effective_threshold());
        detector.set_window_size(config.data_window_size);

        let mut threats = Vec::new();

        let sensors = detector
            .classify(&frame.sensors)
            .and_then(|detection| Ok((detection, self.envelope.check(&frame.sensors)?)));

        let (detection, sensor_error) = match sensors {
            Ok((detection, tamper)) => {
                if detection.is_anomaly {
                    threats.push(Threat::new(
                        ThreatType::AnomalyDetected,
                        anomaly_severity(detection.confidence),
                        detection.confidence,
                        json!({
                            "vehicle_id": frame.vehicle_id,
                            "score": detection.score,
                            "parameters": detection.per_parameter_detail,
                        }),
                    ));
                }
                if tamper.is_tampered {
                    threats.push(Threat::new(
                        ThreatType::DataTampering,
                        tamper.severity.unwrap_or(Severity::High),
                        DATA_TAMPER_CONFIDENCE,
                        json!({
                            "vehicle_id": frame.vehicle_id,
                            "out_of_range": tamper.out_of_range,
                        }),
                    ));
                }
                (detection, None)
            }
            Err(e) => {
                threats.push(Threat::new(
                    ThreatType::DataTampering,
                    Severity::High,
                    DATA_TAMPER_CONFIDENCE,
                    json!({
                        "vehicle_id": frame.vehicle_id,
                        "arity": frame.sensors.arity(),
                        "error": e.to_string(),
                    }),
                ));
                (DetectionResult::no_baseline(), Some(e))
            }
        };

        // Every fix becomes the prior for the next one, spoofed or not
        let gps = check_gps(&frame.gps, detector.last_fix(), config.gps_speed_threshold_mps);
        detector.record_fix(frame.gps.clone());
        if gps.is_spoofed {
            threats.push(Threat::new(
                ThreatType::GpsSpoofing,
                gps.severity.unwrap_or(Severity::High),
                GPS_SPOOF_CONFIDENCE,
                json!({
                    "vehicle_id": frame.vehicle_id,
                    "reason": gps.reason(),
                    "reasons": gps.reasons,
                }),
            ));
        }

        let control = check_control(&frame.control);
        if control.is_hijacked {
            threats.push(Threat::new(
                ThreatType::ControlHijacking,
                control.severity.unwrap_or(Severity::High),
                CONTROL_HIJACK_CONFIDENCE,
                json!({
                    "vehicle_id": frame.vehicle_id,
                    "source": frame.control.source.as_str(),
                    "reason": control.reason.as_ref().map(|r| r.description()),
                }),
            ));
        }

        let responses = self.dispatch(&threats, config.auto_response_enabled);

        if let Some(e) = sensor_error {
            log::warn!("Frame from {} rejected: {}", frame.vehicle_id, e);
            return Err(e);
        }

        Ok(TelemetryReport {
            detection,
            threats,
            responses,
        })
    }

    /// Sink every threat in order, responding to each when enabled
    fn dispatch(&self, threats: &[Threat], auto_response: bool) -> Vec<Response> {
        let mut responses = Vec::new();
        for threat in threats {
            self.sink.record_threat(threat);
            if auto_response {
                let response = self.engine.respond(threat);
                self.sink.record_response(&response);
                responses.push(response);
            }
        }

        if !threats.is_empty() {
            log::debug!("Frame raised {} threat(s)", threats.len());
        }
        responses
    }

    /// Respond to a threat raised outside the pipeline
    pub fn respond(&self, threat: &Threat) -> Response {
        self.sink.record_threat(threat);
        let response = self.engine.respond(threat);
        self.sink.record_response(&response);
        response
    }

    pub fn health(&self) -> HealthSnapshot {
        self.engine.health()
    }

    pub fn initiate_recovery(&self) -> RecoveryPlan {
        self.engine.initiate_recovery()
    }

    pub fn commit_recovery(&self, confirmation: &RecoveryConfirmation) -> DefenseResult<HealthSnapshot> {
        let health = self.engine.commit_recovery(confirmation)?;
        // GPS history from the attack window is not trusted after recovery
        self.detector.lock().clear_history();
        Ok(health)
    }
}
