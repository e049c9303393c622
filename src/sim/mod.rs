// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Simulated temperature source with failure-scenario injection

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::config::{SimulationConfig, ZoneThresholds};
use crate::zones::{Reading, Zone, ZoneMap};

/// Where readings come from. The monitoring loop pulls one reading per
/// tick and does not care whether it is simulated or real hardware.
pub trait DataSource: Send {
    fn next_reading(&mut self) -> anyhow::Result<Reading>;
}

/// Generates plausible freezer temperatures as a smoothed random walk.
///
/// Each zone drifts toward a target with per-zone inertia plus uniform
/// jitter, so consecutive readings stay correlated the way a real
/// thermal mass behaves. With configurable probability the evaporator
/// enters a failure scenario and walks up past its critical threshold
/// until the failure duration expires.
pub struct TemperatureSimulator {
    thresholds: ZoneMap<ZoneThresholds>,
    sim: SimulationConfig,
    last: ZoneMap<f64>,
    failure_mode: bool,
    failure_started: Option<Instant>,
    rng: StdRng,
}

/// Starting temperatures for a healthy unit
const INITIAL_TEMPS: ZoneMap<f64> = ZoneMap {
    evaporator: -18.0,
    condenser: 30.0,
    ambient: 24.0,
};

impl TemperatureSimulator {
    pub fn new(thresholds: ZoneMap<ZoneThresholds>, sim: SimulationConfig) -> Self {
        Self::with_rng(thresholds, sim, StdRng::from_entropy())
    }

    /// Deterministic variant for reproducible runs
    pub fn seeded(thresholds: ZoneMap<ZoneThresholds>, sim: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(thresholds, sim, StdRng::seed_from_u64(seed))
    }

    fn with_rng(thresholds: ZoneMap<ZoneThresholds>, sim: SimulationConfig, rng: StdRng) -> Self {
        Self {
            thresholds,
            sim,
            last: INITIAL_TEMPS,
            failure_mode: false,
            failure_started: None,
            rng,
        }
    }

    /// Whether a failure scenario is currently being injected
    pub fn failure_active(&self) -> bool {
        self.failure_mode
    }

    /// Return to the healthy starting state
    pub fn reset(&mut self) {
        self.last = INITIAL_TEMPS;
        self.failure_mode = false;
        self.failure_started = None;
    }

    fn update_failure_state(&mut self) {
        if self.failure_mode {
            let expired = self
                .failure_started
                .is_some_and(|started| {
                    started.elapsed() >= Duration::from_secs(self.sim.failure_duration_seconds)
                });
            if expired {
                info!("Simulated failure scenario ended, recovering");
                self.failure_mode = false;
                self.failure_started = None;
            }
        } else if self.rng.gen::<f64>() < self.sim.failure_probability {
            warn!("Injecting simulated failure scenario");
            self.failure_mode = true;
            self.failure_started = Some(Instant::now());
        }
    }

    /// One smoothed step of `last` toward `target`
    fn walk(&mut self, last: f64, target: f64, smoothing: f64, jitter_scale: f64) -> f64 {
        let jitter = self
            .rng
            .gen_range(-self.sim.temp_variation_range..=self.sim.temp_variation_range);
        last + (target - last) * smoothing + jitter * jitter_scale
    }

    fn next_evaporator(&mut self) -> f64 {
        let last = self.last[Zone::Evaporator];
        if self.failure_mode {
            // Climb past the critical threshold while the failure lasts
            let overshoot = self.rng.gen_range(0.0..5.0);
            let target = self.thresholds[Zone::Evaporator].critical_high + overshoot;
            self.walk(last, target, 0.3, 0.5)
        } else {
            let target = self
                .rng
                .gen_range(self.sim.normal_evaporator_min..=self.sim.normal_evaporator_max);
            self.walk(last, target, 0.2, 0.5)
        }
    }

    fn next_condenser(&mut self) -> f64 {
        let last = self.last[Zone::Condenser];
        // The condenser works harder when the evaporator is failing
        let target = if self.failure_mode { 42.0 } else { 30.0 };
        self.walk(last, target, 0.2, 1.0)
    }

    fn next_ambient(&mut self) -> f64 {
        let last = self.last[Zone::Ambient];
        // Room air moves slowly and ignores unit state
        self.walk(last, 24.0, 0.1, 0.3)
    }

    /// Render a reading the way the serial logger writes lines, handy
    /// for eyeballing a demo run
    pub fn format_serial_line(reading: &Reading) -> String {
        format!(
            "{} E={:.1} C={:.1} A={:.1}{}",
            reading.timestamp.format("%H:%M:%S"),
            reading.temps[Zone::Evaporator],
            reading.temps[Zone::Condenser],
            reading.temps[Zone::Ambient],
            if reading.failure_mode { " [FAILURE]" } else { "" }
        )
    }
}

impl DataSource for TemperatureSimulator {
    fn next_reading(&mut self) -> anyhow::Result<Reading> {
        self.update_failure_state();

        let temps = ZoneMap::new(
            self.next_evaporator(),
            self.next_condenser(),
            self.next_ambient(),
        );
        self.last = temps;

        let mut reading = Reading::new(Utc::now(), temps);
        reading.failure_mode = self.failure_mode;
        Ok(reading)
    }
}
