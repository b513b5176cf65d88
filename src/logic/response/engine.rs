//! Defense Response Engine
//!
//! State machine over [`SystemPosture`]:
//! - threat level only ratchets up (LOW < MEDIUM < HIGH < CRITICAL)
//! - OPERATIONAL -> FAILOVER_ACTIVE on critical GPS spoofing / control hijacking
//! - back to OPERATIONAL only through plan + commit recovery
//!
//! All mutation goes through one mutex, so concurrent callers are serialized.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::types::{
    FailoverProfile, HealthSnapshot, RecoveryConfirmation, RecoveryPlan, RecoveryStep, Response,
    ResponseAction, SystemPosture, SystemStatus,
};
use crate::error::{DefenseError, DefenseResult};
use crate::logic::threat::{Severity, Threat, ThreatType};

/// Anomalies above this confidence also prepare failover systems
pub const ANOMALY_ESCALATION_CONFIDENCE: f64 = 0.8;

pub const RECOVERY_ESTIMATE: &str = "5-15 minutes";

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug)]
struct PostureState {
    posture: SystemPosture,
    /// Distinct actions issued since the last recovery commit
    countermeasures: BTreeSet<ResponseAction>,
    failover: Option<FailoverProfile>,
    pending_recovery: Option<RecoveryPlan>,
    last_update: DateTime<Utc>,
}

impl PostureState {
    fn new() -> Self {
        Self {
            posture: SystemPosture::default(),
            countermeasures: BTreeSet::new(),
            failover: None,
            pending_recovery: None,
            last_update: Utc::now(),
        }
    }

    fn ratchet(&mut self, severity: Severity) {
        if severity > self.posture.threat_level {
            log::info!(
                "Threat level escalated: {} -> {}",
                self.posture.threat_level,
                severity
            );
            self.posture.threat_level = severity;
        }
    }

    fn activate_failover(&mut self) {
        if !self.posture.failover_active {
            log::warn!("Failover activated: entering AUTONOMOUS_FAILOVER");
        }
        self.posture.failover_active = true;
        self.posture.status = SystemStatus::FailoverActive;
        self.failover = Some(FailoverProfile::autonomous());
    }

    fn health(&self) -> HealthSnapshot {
        HealthSnapshot {
            status: self.posture.status,
            threat_level: self.posture.threat_level,
            failover_active: self.posture.failover_active,
            active_countermeasures: self.countermeasures.len(),
            failover: self.failover.clone(),
            last_update: self.last_update,
        }
    }
}

// ============================================================================
// ACTION TABLE
// ============================================================================

/// Action list for a threat, and whether it forces failover.
fn plan_actions(threat: &Threat) -> (Vec<ResponseAction>, bool) {
    use ResponseAction::*;

    let critical = threat.severity == Severity::Critical;
    match threat.threat_type {
        ThreatType::GpsSpoofing => {
            let mut actions = vec![SwitchToInertialNavigation, VerifyBackupGps];
            if critical {
                actions.extend([InitiateEmergencyLanding, AlertGroundControl]);
            }
            (actions, critical)
        }
        ThreatType::ControlHijacking => {
            let mut actions = vec![LockControlSystems, AuthenticateCommands];
            if critical {
                actions.extend([ActivateAutonomousMode, DisableExternalCommands, EmergencyProtocol]);
            }
            (actions, critical)
        }
        ThreatType::DataTampering => (
            vec![
                VerifyDataIntegrity,
                RestoreFromBackup,
                IsolateCompromisedSensors,
                SwitchToRedundantSystems,
            ],
            false,
        ),
        ThreatType::AnomalyDetected => {
            let mut actions = vec![IncreaseMonitoring, ValidateSensors];
            if threat.confidence > ANOMALY_ESCALATION_CONFIDENCE {
                actions.extend([InitiateDiagnosticMode, PrepareFailoverSystems]);
            }
            (actions, false)
        }
        ThreatType::Unclassified => (vec![LogIncident, AlertOperator], false),
    }
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug)]
pub struct DefenseEngine {
    state: Mutex<PostureState>,
}

impl Default for DefenseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DefenseEngine {
    /// Starts at {LOW, OPERATIONAL, failover off}
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PostureState::new()),
        }
    }

    /// Produce the response for one threat and update posture.
    ///
    /// Never refuses: unknown types get the generic log + alert list.
    pub fn respond(&self, threat: &Threat) -> Response {
        let (actions, triggers_failover) = plan_actions(threat);
        let now = Utc::now();

        let mut state = self.state.lock();
        if triggers_failover {
            state.activate_failover();
        }
        state.ratchet(threat.severity);
        state.countermeasures.extend(actions.iter().copied());
        state.last_update = now;
        drop(state);

        log::info!(
            "Response to {} ({}): {}",
            threat.threat_type,
            threat.severity,
            actions
                .iter()
                .map(ResponseAction::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );

        Response {
            timestamp: now,
            threat_type: threat.threat_type,
            severity: threat.severity,
            actions,
        }
    }

    pub fn posture(&self) -> SystemPosture {
        self.state.lock().posture
    }

    pub fn health(&self) -> HealthSnapshot {
        self.state.lock().health()
    }

    /// Phase one of recovery: issue the plan. Posture is left untouched.
    pub fn initiate_recovery(&self) -> RecoveryPlan {
        let mut state = self.state.lock();
        let plan = RecoveryPlan {
            steps: RecoveryStep::ALL.to_vec(),
            estimated_duration: RECOVERY_ESTIMATE.to_string(),
            requires_operator_approval: state.posture.threat_level == Severity::Critical,
            issued_at: Utc::now(),
        };
        state.pending_recovery = Some(plan.clone());

        log::info!(
            "Recovery plan issued (threat level {}, operator approval {})",
            state.posture.threat_level,
            if plan.requires_operator_approval { "required" } else { "not required" }
        );
        plan
    }

    /// Phase two: reset posture once every step of the pending plan is confirmed.
    ///
    /// Approval is required if the plan asked for it or the level has since
    /// reached CRITICAL.
    pub fn commit_recovery(&self, confirmation: &RecoveryConfirmation) -> DefenseResult<HealthSnapshot> {
        let mut state = self.state.lock();
        let Some(plan) = state.pending_recovery.as_ref() else {
            return Err(DefenseError::NoRecoveryPlan);
        };

        let missing: Vec<String> = plan
            .steps
            .iter()
            .filter(|step| !confirmation.completed_steps.contains(step))
            .map(|step| step.as_str().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DefenseError::RecoveryIncomplete { missing });
        }

        let needs_approval =
            plan.requires_operator_approval || state.posture.threat_level == Severity::Critical;
        if needs_approval && !confirmation.operator_approved {
            return Err(DefenseError::OperatorApprovalRequired);
        }

        let previous = state.posture.threat_level;
        *state = PostureState::new();
        log::info!("Recovery committed: {} -> LOW, status OPERATIONAL", previous);

        Ok(state.health())
    }
}
