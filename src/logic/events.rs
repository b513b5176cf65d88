//! Outbound Events
//!
//! Threat and response records leave the core through a [`ThreatSink`].
//! Storage, listing and aggregation live on the other side.

use parking_lot::RwLock;

use crate::logic::response::Response;
use crate::logic::threat::Threat;

pub trait ThreatSink: Send + Sync {
    fn record_threat(&self, threat: &Threat);
    fn record_response(&self, response: &Response);
}

/// Writes every record to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ThreatSink for LogSink {
    fn record_threat(&self, threat: &Threat) {
        log::warn!(
            "[THREAT] {} severity={} confidence={:.2} id={}",
            threat.threat_type,
            threat.severity,
            threat.confidence,
            threat.id
        );
    }

    fn record_response(&self, response: &Response) {
        log::info!(
            "[RESPONSE] {} severity={} actions={}",
            response.threat_type,
            response.severity,
            response.actions.len()
        );
    }
}

/// Keeps both streams in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    threats: RwLock<Vec<Threat>>,
    responses: RwLock<Vec<Response>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threats(&self) -> Vec<Threat> {
        self.threats.read().clone()
    }

    pub fn responses(&self) -> Vec<Response> {
        self.responses.read().clone()
    }

    pub fn clear(&self) {
        self.threats.write().clear();
        self.responses.write().clear();
    }
}

impl ThreatSink for MemorySink {
    fn record_threat(&self, threat: &Threat) {
        self.threats.write().push(threat.clone());
    }

    fn record_response(&self, response: &Response) {
        self.responses.write().push(response.clone());
    }
}

impl<T: ThreatSink + ?Sized> ThreatSink for std::sync::Arc<T> {
    fn record_threat(&self, threat: &Threat) {
        (**self).record_threat(threat)
    }

    fn record_response(&self, response: &Response) {
        (**self).record_response(response)
    }
}
