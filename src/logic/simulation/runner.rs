//! Attack Simulation Runner
//!
//! One bounded run at a time. Each run is a tokio task ticking at 1 Hz
//! that stops once the measured elapsed time reaches the duration or when its
//! [`SimulationHandle`] cancels (or is dropped).

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::generator::TelemetryGenerator;
use super::types::{AttackKind, ScenarioLog, SimulatedEvent, SimulationStatus};
use crate::constants::{MAX_SCENARIO_EVENTS, SIMULATION_TICK_MS};
use crate::error::{DefenseError, DefenseResult};
use crate::logic::model::RingBuffer;

// ============================================================================
// SIMULATOR
// ============================================================================

pub struct AttackSimulator {
    generator: Arc<Mutex<TelemetryGenerator>>,
    current: Arc<RwLock<Option<AttackKind>>>,
    max_events: usize,
    tick: Duration,
}

impl AttackSimulator {
    pub fn new(generator: TelemetryGenerator) -> Self {
        Self {
            generator: Arc::new(Mutex::new(generator)),
            current: Arc::new(RwLock::new(None)),
            max_events: MAX_SCENARIO_EVENTS,
            tick: Duration::from_millis(SIMULATION_TICK_MS),
        }
    }

    /// Override the wall-clock cadence. Generated frames keep their 1 s
    /// logical clock.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        if !tick.is_zero() {
            self.tick = tick;
        }
        self
    }

    /// Override the event log cap (at least 1)
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events.max(1);
        self
    }

    /// Shared access for training data and one-off frames
    pub fn generator(&self) -> Arc<Mutex<TelemetryGenerator>> {
        Arc::clone(&self.generator)
    }

    pub fn status(&self) -> SimulationStatus {
        let current = *self.current.read();
        SimulationStatus {
            is_running: current.is_some(),
            current_scenario: current,
            available_scenarios: AttackKind::SCENARIOS.to_vec(),
        }
    }

    pub fn start(&self, kind: AttackKind, duration_ms: u64) -> DefenseResult<SimulationHandle> {
        self.start_with(kind, duration_ms, |_| {})
    }

    /// Start a run, calling `on_event` for every generated event in tick order.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start_with<F>(
        &self,
        kind: AttackKind,
        duration_ms: u64,
        mut on_event: F,
    ) -> DefenseResult<SimulationHandle>
    where
        F: FnMut(&SimulatedEvent) + Send + 'static,
    {
        {
            let mut current = self.current.write();
            if let Some(running) = *current {
                return Err(DefenseError::SimulationBusy(running.as_str().to_string()));
            }
            *current = Some(kind);
        }

        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let guard = RunGuard(Arc::clone(&self.current));
        let generator = Arc::clone(&self.generator);
        let max_events = self.max_events;
        let tick = self.tick;

        log::info!("[SIMULATION] Starting {} for {}ms", kind, duration_ms);

        let task = tokio::spawn(async move {
            let _guard = guard;
            let started_at = Utc::now();
            let started = Instant::now();
            let duration = Duration::from_millis(duration_ms);
            let mut interval = interval_at(started + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut events = RingBuffer::new(max_events);
            let mut dropped_events = 0usize;
            let mut cancelled = false;
            let mut ticks = 0u64;

            while started.elapsed() < duration {
                tokio::select! {
                    biased;
                    changed = cancel_rx.changed() => {
                        // Err: handle dropped
                        if changed.is_err() || *cancel_rx.borrow() {
                            cancelled = true;
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        ticks += 1;
                        let mut event = generator.lock().generate(kind);
                        event.tick = ticks;
                        on_event(&event);
                        if events.push(event).is_some() {
                            dropped_events += 1;
                        }
                    }
                }
            }

            if cancelled {
                log::warn!("[SIMULATION] {} cancelled after {} ticks", kind, ticks);
            } else {
                log::info!("[SIMULATION] {} completed ({} ticks)", kind, ticks);
            }

            ScenarioLog {
                kind,
                started_at,
                duration_ms,
                events: events.into_vec(),
                dropped_events,
                cancelled,
            }
        });

        Ok(SimulationHandle {
            cancel: cancel_tx,
            task,
        })
    }
}

impl Default for AttackSimulator {
    fn default() -> Self {
        Self::new(TelemetryGenerator::new("vehicle-001"))
    }
}

/// Clears the running scenario when the task ends, panics included
struct RunGuard(Arc<RwLock<Option<AttackKind>>>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        *self.0.write() = None;
    }
}

// ============================================================================
// HANDLE
// ============================================================================

/// Dropping the handle cancels the run.
pub struct SimulationHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<ScenarioLog>,
}

impl SimulationHandle {
    pub fn cancel(&self) {
        // Receiver gone means the run already finished
        let _ = self.cancel.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to finish and return its event log
    pub async fn join(self) -> DefenseResult<ScenarioLog> {
        let SimulationHandle { cancel, task } = self;
        let result = task.await;
        drop(cancel);
        result.map_err(|e| DefenseError::SimulationAborted(e.to_string()))
    }
}
