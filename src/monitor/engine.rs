// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Monitoring loop: pull a reading, classify every zone, decide alerts,
//! record history

use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::history::{HistoryRecord, HistoryStore};
use crate::monitor::alerts::{AlertDecisionEngine, AlertEvent};
use crate::monitor::classify::classify;
use crate::monitor::state::ZoneStates;
use crate::notify::Notifier;
use crate::sim::DataSource;
use crate::zones::{Reading, Status, Zone, ZoneMap};

/// Lifetime counters for the run loop
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStats {
    pub readings_processed: u64,
    pub alerts_fired: u64,
}

/// Owns the data source, zone states and history, and drives them on a
/// fixed interval.
///
/// Single writer: only the run loop mutates states and history. Other
/// tasks read through cloned snapshots, so a slow reader can never
/// stall a tick.
pub struct MonitorEngine {
    source: Mutex<Box<dyn DataSource>>,
    history: Arc<HistoryStore>,
    notifier: Arc<dyn Notifier>,
    states: RwLock<ZoneStates>,
    readings_processed: AtomicU64,
    alerts_fired: AtomicU64,
}

impl MonitorEngine {
    pub fn new(
        source: Box<dyn DataSource>,
        history: Arc<HistoryStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            source: Mutex::new(source),
            history,
            notifier,
            states: RwLock::new(ZoneStates::new()),
            readings_processed: AtomicU64::new(0),
            alerts_fired: AtomicU64::new(0),
        }
    }

    pub fn history(&self) -> Arc<HistoryStore> {
        self.history.clone()
    }

    /// Snapshot of the current zone states
    pub fn states(&self) -> ZoneStates {
        self.states.read().clone()
    }

    /// Clear counters and alert timestamps, e.g. after a config reload
    pub fn reset_states(&self) {
        self.states.write().reset();
        info!("Zone states reset");
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            readings_processed: self.readings_processed.load(Ordering::Relaxed),
            alerts_fired: self.alerts_fired.load(Ordering::Relaxed),
        }
    }

    /// Evaluate one reading against the given configuration.
    ///
    /// Every zone is classified independently. A zone whose value fails
    /// classification is logged and skipped; its state and last known
    /// status are left untouched so one bad sensor cannot mask the
    /// others. Returns the alerts that fired.
    pub fn process_reading(
        &self,
        reading: &Reading,
        config: &Config,
        now: DateTime<Utc>,
    ) -> Vec<AlertEvent> {
        let mut states = self.states.write();
        let mut fired = Vec::new();

        // Pre-seed with retained statuses so skipped zones keep theirs
        let mut statuses: ZoneMap<Status> = states.statuses();

        for zone in Zone::ALL {
            let value = reading.value(zone);
            let status = match classify(zone, value, &config.thresholds[zone]) {
                Ok(status) => status,
                Err(e) => {
                    warn!(zone = %zone, "Skipping unclassifiable value: {}", e);
                    continue;
                }
            };
            statuses[zone] = status;

            let state = states.get_mut(zone);
            state.observe(status);

            if let Some(event) = AlertDecisionEngine::evaluate(
                state,
                &config.alerts,
                reading,
                &config.thresholds[zone],
                now,
            ) {
                info!(
                    zone = %zone,
                    temperature = value,
                    run = state.consecutive_critical,
                    "Alert fired"
                );
                fired.push(event);
            }
        }
        drop(states);

        self.readings_processed.fetch_add(1, Ordering::Relaxed);
        self.alerts_fired
            .fetch_add(fired.len() as u64, Ordering::Relaxed);

        if config.history.enabled {
            let record = HistoryRecord::new(
                reading.timestamp,
                reading.temps,
                statuses,
                reading.failure_mode,
            );
            if let Err(e) = self.history.append(record) {
                warn!("Dropping history record: {}", e);
            }
        }

        fired
    }

    /// Hand alerts to the notifier without blocking the loop. Delivery
    /// failures are logged, never propagated.
    fn dispatch(&self, events: Vec<AlertEvent>) {
        for event in events {
            let notifier = self.notifier.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.send(&event).await {
                    error!(zone = %event.zone, "Alert delivery failed: {}", e);
                }
            });
        }
    }

    /// One cycle: pull, evaluate, dispatch, prune
    pub fn tick(&self, config: &Config) {
        let reading = match self.source.lock().next_reading() {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Data source error, skipping cycle: {}", e);
                return;
            }
        };

        debug!(
            evaporator = reading.temps[Zone::Evaporator],
            condenser = reading.temps[Zone::Condenser],
            ambient = reading.temps[Zone::Ambient],
            failure_mode = reading.failure_mode,
            "Reading collected"
        );

        let fired = self.process_reading(&reading, config, Utc::now());
        self.dispatch(fired);

        if config.history.enabled {
            self.history
                .prune(Duration::days(config.history.retention_days as i64), Utc::now());
        }
    }

    /// Run until shutdown is signalled
    pub async fn run(
        self: Arc<Self>,
        config: Arc<RwLock<Config>>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let interval_seconds = config.read().collection.reading_interval_seconds.max(1);
        let mut ticker =
            tokio::time::interval(std::time::Duration::from_secs(interval_seconds));

        info!("Monitoring loop started ({}s interval)", interval_seconds);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let snapshot = config.read().clone();
                    self.tick(&snapshot);
                }
                _ = shutdown.recv() => {
                    let stats = self.stats();
                    info!(
                        readings = stats.readings_processed,
                        alerts = stats.alerts_fired,
                        "Monitoring loop stopped"
                    );
                    break;
                }
            }
        }
    }
}
