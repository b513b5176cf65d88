//! Sky-Shield Demo Runner
//!
//! Trains a baseline on generated telemetry, replays attack scenarios
//! through the defense pipeline, then prints posture and recovery plan.
//!
//! ```text
//! sky-shield [SCENARIO ...]      # GPS_SPOOFING CONTROL_HIJACKING DATA_TAMPERING ANOMALIES
//! ```
//!
//! Environment (also read from `.env`):
//! - `DEFENSE_ANOMALY_THRESHOLD`, `DEFENSE_GPS_SPEED_THRESHOLD`, `DEFENSE_WINDOW_SIZE`
//! - `DEFENSE_SENSITIVITY` (low | medium | high), `DEFENSE_AUTO_RESPONSE`
//! - `SIM_DURATION_MS`

use std::process::ExitCode;
use std::sync::Arc;

use sky_shield_core::constants::{self, APP_NAME, APP_VERSION, DEFAULT_TRAINING_SAMPLES};
use sky_shield_core::logic::config::{DefenseConfig, SharedConfig};
use sky_shield_core::logic::events::{LogSink, MemorySink, ThreatSink};
use sky_shield_core::logic::monitor::DefenseMonitor;
use sky_shield_core::logic::response::Response;
use sky_shield_core::logic::simulation::{AttackKind, AttackSimulator, TelemetryGenerator};
use sky_shield_core::logic::threat::Threat;
use sky_shield_core::DefenseResult;

/// Forwards to the log and keeps a copy for the summary
struct DemoSink {
    memory: Arc<MemorySink>,
}

impl ThreatSink for DemoSink {
    fn record_threat(&self, threat: &Threat) {
        LogSink.record_threat(threat);
        self.memory.record_threat(threat);
    }

    fn record_response(&self, response: &Response) {
        LogSink.record_response(response);
        self.memory.record_response(response);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> DefenseResult<()> {
    let config = SharedConfig::new(DefenseConfig::from_env())?;
    let memory = Arc::new(MemorySink::new());
    let monitor = Arc::new(DefenseMonitor::new(
        config,
        DemoSink {
            memory: Arc::clone(&memory),
        },
    ));

    let mut generator = TelemetryGenerator::new("vehicle-001");
    monitor.train_baseline(&generator.generate_training_data(DEFAULT_TRAINING_SAMPLES))?;
    let simulator = AttackSimulator::new(generator);

    let scenarios: Vec<AttackKind> = {
        let args: Vec<String> = std::env::args().skip(1).collect();
        if args.is_empty() {
            AttackKind::SCENARIOS.to_vec()
        } else {
            args.iter().map(|a| AttackKind::from_str(a)).collect()
        }
    };
    let duration_ms = constants::get_simulation_duration_ms();

    for kind in scenarios {
        let feed = Arc::clone(&monitor);
        let handle = simulator.start_with(kind, duration_ms, move |event| {
            if let Err(e) = feed.process_telemetry(&event.frame) {
                log::error!("Tick {} rejected: {}", event.tick, e);
            }
        })?;
        let log = handle.join().await?;
        log::info!(
            "{}: {} events, {} threats so far",
            log.kind,
            log.events.len(),
            memory.threats().len()
        );
    }

    let health = monitor.health();
    let plan = monitor.initiate_recovery();

    match serde_json::to_string_pretty(&health) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize health: {}", e),
    }
    match serde_json::to_string_pretty(&plan) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize recovery plan: {}", e),
    }

    Ok(())
}
