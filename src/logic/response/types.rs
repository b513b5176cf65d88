//! Response Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::threat::{Severity, ThreatType};

// ============================================================================
// RESPONSE ACTION TYPES
// ============================================================================

/// Remediation action codes issued by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseAction {
    // GPS spoofing
    SwitchToInertialNavigation,
    VerifyBackupGps,
    InitiateEmergencyLanding,
    AlertGroundControl,

    // Control hijacking
    LockControlSystems,
    AuthenticateCommands,
    ActivateAutonomousMode,
    DisableExternalCommands,
    EmergencyProtocol,

    // Data tampering
    VerifyDataIntegrity,
    RestoreFromBackup,
    IsolateCompromisedSensors,
    SwitchToRedundantSystems,

    // Anomaly
    IncreaseMonitoring,
    ValidateSensors,
    InitiateDiagnosticMode,
    PrepareFailoverSystems,

    // Fallback
    LogIncident,
    AlertOperator,
}

impl ResponseAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseAction::SwitchToInertialNavigation => "SWITCH_TO_INERTIAL_NAVIGATION",
            ResponseAction::VerifyBackupGps => "VERIFY_BACKUP_GPS",
            ResponseAction::InitiateEmergencyLanding => "INITIATE_EMERGENCY_LANDING",
            ResponseAction::AlertGroundControl => "ALERT_GROUND_CONTROL",
            ResponseAction::LockControlSystems => "LOCK_CONTROL_SYSTEMS",
            ResponseAction::AuthenticateCommands => "AUTHENTICATE_COMMANDS",
            ResponseAction::ActivateAutonomousMode => "ACTIVATE_AUTONOMOUS_MODE",
            ResponseAction::DisableExternalCommands => "DISABLE_EXTERNAL_COMMANDS",
            ResponseAction::EmergencyProtocol => "EMERGENCY_PROTOCOL",
            ResponseAction::VerifyDataIntegrity => "VERIFY_DATA_INTEGRITY",
            ResponseAction::RestoreFromBackup => "RESTORE_FROM_BACKUP",
            ResponseAction::IsolateCompromisedSensors => "ISOLATE_COMPROMISED_SENSORS",
            ResponseAction::SwitchToRedundantSystems => "SWITCH_TO_REDUNDANT_SYSTEMS",
            ResponseAction::IncreaseMonitoring => "INCREASE_MONITORING",
            ResponseAction::ValidateSensors => "VALIDATE_SENSORS",
            ResponseAction::InitiateDiagnosticMode => "INITIATE_DIAGNOSTIC_MODE",
            ResponseAction::PrepareFailoverSystems => "PREPARE_FAILOVER_SYSTEMS",
            ResponseAction::LogIncident => "LOG_INCIDENT",
            ResponseAction::AlertOperator => "ALERT_OPERATOR",
        }
    }
}

impl std::fmt::Display for ResponseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outbound response record (audit / logging consumers)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub timestamp: DateTime<Utc>,
    pub threat_type: ThreatType,
    pub severity: Severity,
    pub actions: Vec<ResponseAction>,
}

// ============================================================================
// POSTURE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    #[default]
    Operational,
    FailoverActive,
}

impl SystemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemStatus::Operational => "OPERATIONAL",
            SystemStatus::FailoverActive => "FAILOVER_ACTIVE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemPosture {
    /// Monotonic within a session; reset only by a recovery commit
    pub threat_level: Severity,
    pub status: SystemStatus,
    pub failover_active: bool,
}

/// Restricted operating mode entered on failover
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailoverProfile {
    pub mode: String,
    pub capabilities: Vec<String>,
    pub restrictions: Vec<String>,
}

impl FailoverProfile {
    pub fn autonomous() -> Self {
        Self {
            mode: "AUTONOMOUS_FAILOVER".to_string(),
            capabilities: vec![
                "BASIC_NAVIGATION".to_string(),
                "EMERGENCY_LANDING".to_string(),
                "COMMUNICATION".to_string(),
            ],
            restrictions: vec![
                "NO_EXTERNAL_COMMANDS".to_string(),
                "LIMITED_MANEUVERS".to_string(),
            ],
        }
    }
}

/// Read-only posture snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: SystemStatus,
    pub threat_level: Severity,
    pub failover_active: bool,
    pub active_countermeasures: usize,
    pub failover: Option<FailoverProfile>,
    pub last_update: DateTime<Utc>,
}

// ============================================================================
// RECOVERY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryStep {
    SystemDiagnostics,
    ThreatAssessment,
    ComponentVerification,
    GradualSystemRestore,
    FullOperationalMode,
}

impl RecoveryStep {
    /// Fixed execution order
    pub const ALL: [RecoveryStep; 5] = [
        RecoveryStep::SystemDiagnostics,
        RecoveryStep::ThreatAssessment,
        RecoveryStep::ComponentVerification,
        RecoveryStep::GradualSystemRestore,
        RecoveryStep::FullOperationalMode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryStep::SystemDiagnostics => "SYSTEM_DIAGNOSTICS",
            RecoveryStep::ThreatAssessment => "THREAT_ASSESSMENT",
            RecoveryStep::ComponentVerification => "COMPONENT_VERIFICATION",
            RecoveryStep::GradualSystemRestore => "GRADUAL_SYSTEM_RESTORE",
            RecoveryStep::FullOperationalMode => "FULL_OPERATIONAL_MODE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPlan {
    pub steps: Vec<RecoveryStep>,
    pub estimated_duration: String,
    pub requires_operator_approval: bool,
    pub issued_at: DateTime<Utc>,
}

/// External confirmation that a plan's steps were carried out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfirmation {
    pub completed_steps: Vec<RecoveryStep>,
    pub operator_approved: bool,
}

impl RecoveryConfirmation {
    /// Every step of `plan` confirmed
    pub fn all_steps(plan: &RecoveryPlan, operator_approved: bool) -> Self {
        Self {
            completed_steps: plan.steps.clone(),
            operator_approved,
        }
    }
}
