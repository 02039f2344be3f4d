//! Simulated drive.
//!
//! A cancellable periodic task that drains the battery one percent per tick
//! and re-runs the estimation pipeline on the new level. Each tick's result
//! is published into a single-slot watch channel: consumers only ever see
//! the latest value, and a slow estimate arriving after a faster later one
//! is simply overwritten (last write wins, by arrival order).

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::{BatteryLevel, Estimate};
use crate::estimate::Estimator;
use crate::oracle::Oracle;

/// Default interval between simulated ticks.
const DEFAULT_TICK: Duration = Duration::from_secs(3);

/// One tick of the simulation: the drained level and its estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct DriveTick {
    pub battery: BatteryLevel,
    pub estimate: Estimate,
}

/// Periodic battery-drain simulation.
pub struct DriveSimulator<O> {
    estimator: Estimator<O>,
    tick: Duration,
    latest: Arc<watch::Sender<Option<DriveTick>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<O: Oracle + Clone + 'static> DriveSimulator<O> {
    pub fn new(estimator: Estimator<O>) -> Self {
        Self::with_tick(estimator, DEFAULT_TICK)
    }

    /// Create a simulator with a custom tick interval (shortened in tests).
    pub fn with_tick(estimator: Estimator<O>, tick: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            estimator,
            tick,
            latest: Arc::new(tx),
            task: Mutex::new(None),
        }
    }

    /// Start draining from the given level, replacing any previous run.
    ///
    /// The task drains one percent per tick, estimates at the new level,
    /// publishes the result, and stops by itself once the battery is empty.
    pub async fn start(&self, from: BatteryLevel) {
        let mut guard = self.task.lock().await;
        if let Some(handle) = guard.take() {
            handle.abort();
        }

        let estimator = self.estimator.clone();
        let latest = Arc::clone(&self.latest);
        let tick = self.tick;

        info!(from = %from, "simulated drive started");

        *guard = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.tick().await; // first tick fires immediately, skip it

            let mut battery = from;
            loop {
                interval.tick().await;
                if battery.is_empty() {
                    break;
                }
                battery = battery.drained();

                let time_label = Local::now().format("%H:%M:%S").to_string();
                let estimate = estimator.estimate(battery, &time_label).await;
                let _ = latest.send(Some(DriveTick { battery, estimate }));
            }
            info!("simulated drive reached empty battery");
        }));
    }

    /// Cancel the running simulation, if any.
    pub async fn stop(&self) {
        let mut guard = self.task.lock().await;
        if let Some(handle) = guard.take() {
            handle.abort();
            info!("simulated drive stopped");
        }
    }

    /// Whether a simulation task is currently live.
    pub async fn is_running(&self) -> bool {
        let guard = self.task.lock().await;
        guard.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// The most recent tick, if any has been published.
    pub fn latest(&self) -> Option<DriveTick> {
        self.latest.borrow().clone()
    }

    /// Subscribe to tick updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<DriveTick>> {
        self.latest.subscribe()
    }
}
