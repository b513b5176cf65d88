use std::sync::Arc;

use super::engine::DefenseEngine;
use super::types::{RecoveryConfirmation, RecoveryStep, ResponseAction, SystemStatus};
use crate::error::DefenseError;
use crate::logic::threat::{Severity, Threat, ThreatType};

fn threat(threat_type: ThreatType, severity: Severity, confidence: f64) -> Threat {
    Threat::new(threat_type, severity, confidence, serde_json::Value::Null)
}

#[test]
fn test_initial_posture() {
    let engine = DefenseEngine::new();
    let health = engine.health();

    assert_eq!(health.status, SystemStatus::Operational);
    assert_eq!(health.threat_level, Severity::Low);
    assert!(!health.failover_active);
    assert_eq!(health.active_countermeasures, 0);
    assert!(health.failover.is_none());
}

#[test]
fn test_critical_hijack_triggers_failover() {
    let engine = DefenseEngine::new();
    let response = engine.respond(&threat(ThreatType::ControlHijacking, Severity::Critical, 0.98));

    assert_eq!(
        response.actions,
        vec![
            ResponseAction::LockControlSystems,
            ResponseAction::AuthenticateCommands,
            ResponseAction::ActivateAutonomousMode,
            ResponseAction::DisableExternalCommands,
            ResponseAction::EmergencyProtocol,
        ]
    );

    let posture = engine.posture();
    assert!(posture.failover_active);
    assert_eq!(posture.status, SystemStatus::FailoverActive);
    assert_eq!(posture.threat_level, Severity::Critical);
    assert!(engine.health().failover.is_some());
}

#[test]
fn test_critical_gps_spoofing_triggers_failover() {
    let engine = DefenseEngine::new();
    let response = engine.respond(&threat(ThreatType::GpsSpoofing, Severity::Critical, 0.95));

    assert!(response.actions.contains(&ResponseAction::InitiateEmergencyLanding));
    assert!(response.actions.contains(&ResponseAction::AlertGroundControl));
    assert!(engine.posture().failover_active);
}

#[test]
fn test_high_gps_spoofing_no_failover() {
    let engine = DefenseEngine::new();
    let response = engine.respond(&threat(ThreatType::GpsSpoofing, Severity::High, 0.95));

    assert_eq!(
        response.actions,
        vec![ResponseAction::SwitchToInertialNavigation, ResponseAction::VerifyBackupGps]
    );
    assert!(!engine.posture().failover_active);
    assert_eq!(engine.posture().threat_level, Severity::High);
}

#[test]
fn test_data_tampering_actions() {
    let engine = DefenseEngine::new();
    // Even CRITICAL tampering does not switch posture
    let response = engine.respond(&threat(ThreatType::DataTampering, Severity::Critical, 0.92));

    assert_eq!(response.actions.len(), 4);
    assert_eq!(response.actions[0], ResponseAction::VerifyDataIntegrity);
    assert_eq!(response.actions[3], ResponseAction::SwitchToRedundantSystems);
    assert!(!engine.posture().failover_active);
    assert_eq!(engine.posture().threat_level, Severity::Critical);
}

#[test]
fn test_anomaly_confidence_escalation() {
    let engine = DefenseEngine::new();

    let low = engine.respond(&threat(ThreatType::AnomalyDetected, Severity::Medium, 0.5));
    assert_eq!(
        low.actions,
        vec![ResponseAction::IncreaseMonitoring, ResponseAction::ValidateSensors]
    );

    // Exactly 0.8 is not above the escalation line
    let edge = engine.respond(&threat(ThreatType::AnomalyDetected, Severity::High, 0.8));
    assert_eq!(edge.actions.len(), 2);

    let high = engine.respond(&threat(ThreatType::AnomalyDetected, Severity::High, 0.95));
    assert!(high.actions.contains(&ResponseAction::InitiateDiagnosticMode));
    assert!(high.actions.contains(&ResponseAction::PrepareFailoverSystems));

    // Anomalies never switch to failover on their own
    assert!(!engine.posture().failover_active);
}

#[test]
fn test_unclassified_gets_generic_response() {
    let engine = DefenseEngine::new();
    let response = engine.respond(&threat(ThreatType::Unclassified, Severity::Medium, 0.4));

    assert_eq!(
        response.actions,
        vec![ResponseAction::LogIncident, ResponseAction::AlertOperator]
    );
    assert_eq!(engine.posture().threat_level, Severity::Medium);
}

#[test]
fn test_threat_level_ratchet() {
    let engine = DefenseEngine::new();
    for severity in [Severity::Low, Severity::Critical, Severity::Medium] {
        engine.respond(&threat(ThreatType::AnomalyDetected, severity, 0.5));
    }
    assert_eq!(engine.posture().threat_level, Severity::Critical);
}

#[test]
fn test_countermeasures_are_distinct() {
    let engine = DefenseEngine::new();
    engine.respond(&threat(ThreatType::AnomalyDetected, Severity::Medium, 0.5));
    engine.respond(&threat(ThreatType::AnomalyDetected, Severity::Medium, 0.5));
    assert_eq!(engine.health().active_countermeasures, 2);

    engine.respond(&threat(ThreatType::Unclassified, Severity::Low, 0.1));
    assert_eq!(engine.health().active_countermeasures, 4);
}

#[test]
fn test_recovery_plan_approval_flag() {
    let engine = DefenseEngine::new();
    let plan = engine.initiate_recovery();
    assert!(!plan.requires_operator_approval);
    assert_eq!(plan.steps, RecoveryStep::ALL.to_vec());
    assert_eq!(plan.estimated_duration, "5-15 minutes");

    engine.respond(&threat(ThreatType::ControlHijacking, Severity::Critical, 0.98));
    let plan = engine.initiate_recovery();
    assert!(plan.requires_operator_approval);

    // Planning alone does not reset posture
    assert!(engine.posture().failover_active);
    assert_eq!(engine.posture().threat_level, Severity::Critical);
}

#[test]
fn test_commit_without_plan() {
    let engine = DefenseEngine::new();
    let err = engine.commit_recovery(&RecoveryConfirmation::default()).unwrap_err();
    assert_eq!(err, DefenseError::NoRecoveryPlan);
}

#[test]
fn test_commit_requires_all_steps() {
    let engine = DefenseEngine::new();
    engine.respond(&threat(ThreatType::GpsSpoofing, Severity::High, 0.95));
    engine.initiate_recovery();

    let partial = RecoveryConfirmation {
        completed_steps: vec![RecoveryStep::SystemDiagnostics, RecoveryStep::ThreatAssessment],
        operator_approved: false,
    };
    match engine.commit_recovery(&partial) {
        Err(DefenseError::RecoveryIncomplete { missing }) => {
            assert_eq!(missing.len(), 3);
            assert_eq!(missing[0], "COMPONENT_VERIFICATION");
        }
        other => panic!("Expected RecoveryIncomplete, got {:?}", other),
    }
    assert_eq!(engine.posture().threat_level, Severity::High);
}

#[test]
fn test_commit_critical_needs_approval_then_resets() {
    let engine = DefenseEngine::new();
    engine.respond(&threat(ThreatType::ControlHijacking, Severity::Critical, 0.98));
    let plan = engine.initiate_recovery();

    let unapproved = RecoveryConfirmation::all_steps(&plan, false);
    assert_eq!(
        engine.commit_recovery(&unapproved).unwrap_err(),
        DefenseError::OperatorApprovalRequired
    );
    assert!(engine.posture().failover_active);

    let approved = RecoveryConfirmation::all_steps(&plan, true);
    let health = engine.commit_recovery(&approved).unwrap();
    assert_eq!(health.threat_level, Severity::Low);
    assert_eq!(health.status, SystemStatus::Operational);
    assert!(!health.failover_active);
    assert_eq!(health.active_countermeasures, 0);

    // Plan is consumed by the commit
    assert_eq!(
        engine.commit_recovery(&approved).unwrap_err(),
        DefenseError::NoRecoveryPlan
    );
}

#[test]
fn test_escalation_after_plan_requires_approval() {
    let engine = DefenseEngine::new();
    let plan = engine.initiate_recovery();
    assert!(!plan.requires_operator_approval);

    engine.respond(&threat(ThreatType::GpsSpoofing, Severity::Critical, 0.95));
    let result = engine.commit_recovery(&RecoveryConfirmation::all_steps(&plan, false));
    assert_eq!(result.unwrap_err(), DefenseError::OperatorApprovalRequired);
}

#[test]
fn test_concurrent_responses_serialized() {
    let engine = Arc::new(DefenseEngine::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let severity = if i == 3 { Severity::Critical } else { Severity::Medium };
                for _ in 0..50 {
                    engine.respond(&threat(ThreatType::AnomalyDetected, severity, 0.5));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.posture().threat_level, Severity::Critical);
}
