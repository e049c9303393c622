// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Alert decision logic - consecutive-count gate plus cooldown throttle

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AlertConfig, ZoneThresholds};
use crate::monitor::state::ZoneState;
use crate::zones::{Reading, Status, Zone};

/// A triggered alert, handed to the notifier sink exactly once.
///
/// Carries snapshots of the full reading and the triggering zone's
/// thresholds so the notifier needs no access to live state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub zone: Zone,
    pub status: Status,
    pub reading: Reading,
    pub thresholds: ZoneThresholds,
}

/// Decides whether a zone's state warrants an alert right now.
///
/// Zones are evaluated independently: one zone firing has no effect on
/// another zone's counter or cooldown.
pub struct AlertDecisionEngine;

impl AlertDecisionEngine {
    /// Fire iff the zone is CRITICAL, the run length has reached the
    /// configured threshold, and the cooldown window has elapsed.
    /// On fire, stamps `last_alert_at` on the state.
    pub fn evaluate(
        state: &mut ZoneState,
        config: &AlertConfig,
        reading: &Reading,
        thresholds: &ZoneThresholds,
        now: DateTime<Utc>,
    ) -> Option<AlertEvent> {
        if !config.enabled {
            return None;
        }
        if state.current_status != Status::Critical {
            return None;
        }
        if state.consecutive_critical < config.consecutive_critical_threshold {
            return None;
        }
        if !Self::cooldown_elapsed(state.last_alert_at, config.cooldown_seconds, now) {
            return None;
        }

        state.last_alert_at = Some(now);

        Some(AlertEvent {
            id: Uuid::new_v4(),
            timestamp: now,
            zone: state.zone,
            status: state.current_status,
            reading: reading.clone(),
            thresholds: *thresholds,
        })
    }

    /// A clock that moved backwards yields a negative elapsed duration,
    /// which counts as "not elapsed": fail toward suppressing alerts
    /// rather than flooding them.
    fn cooldown_elapsed(last: Option<DateTime<Utc>>, cooldown_seconds: u64, now: DateTime<Utc>) -> bool {
        match last {
            None => true,
            Some(last) => {
                now.signed_duration_since(last) >= Duration::seconds(cooldown_seconds as i64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::classify;
    use crate::zones::ZoneMap;
    use chrono::TimeZone;

    fn test_thresholds() -> ZoneThresholds {
        ZoneThresholds {
            normal_min: -20.0,
            normal_max: -15.0,
            critical_low: -25.0,
            critical_high: -10.0,
        }
    }

    fn test_config() -> AlertConfig {
        AlertConfig {
            enabled: true,
            cooldown_seconds: 300,
            consecutive_critical_threshold: 2,
        }
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    fn reading_at(seconds: i64, evaporator: f64) -> Reading {
        Reading::new(at(seconds), ZoneMap::new(evaporator, 30.0, 24.0))
    }

    /// Drive one sample through classify + observe + evaluate.
    fn step(
        state: &mut ZoneState,
        config: &AlertConfig,
        value: f64,
        seconds: i64,
    ) -> Option<AlertEvent> {
        let thresholds = test_thresholds();
        let status = classify(state.zone, value, &thresholds).unwrap();
        state.observe(status);
        let reading = reading_at(seconds, value);
        AlertDecisionEngine::evaluate(state, config, &reading, &thresholds, at(seconds))
    }

    #[test]
    fn sustained_critical_fires_once_within_cooldown() {
        // -26 every 10s: CRITICAL each sample, alert on the 2nd only.
        let mut state = ZoneState::new(Zone::Evaporator);
        let config = test_config();

        assert!(step(&mut state, &config, -26.0, 0).is_none());
        let event = step(&mut state, &config, -26.0, 10).expect("2nd sample fires");
        assert_eq!(event.zone, Zone::Evaporator);
        assert_eq!(event.status, Status::Critical);
        assert_eq!(state.last_alert_at, Some(at(10)));

        assert!(step(&mut state, &config, -26.0, 20).is_none());
        assert!(step(&mut state, &config, -26.0, 30).is_none());
    }

    #[test]
    fn recovery_resets_the_run() {
        // -26, -18, -26, -26: counter goes 1, 0, 1, 2 and only the
        // fourth sample fires.
        let mut state = ZoneState::new(Zone::Evaporator);
        let config = test_config();

        assert!(step(&mut state, &config, -26.0, 0).is_none());
        assert_eq!(state.consecutive_critical, 1);

        assert!(step(&mut state, &config, -18.0, 10).is_none());
        assert_eq!(state.consecutive_critical, 0);

        assert!(step(&mut state, &config, -26.0, 20).is_none());
        assert_eq!(state.consecutive_critical, 1);

        assert!(step(&mut state, &config, -26.0, 30).is_some());
        assert_eq!(state.consecutive_critical, 2);
    }

    #[test]
    fn alert_fires_again_after_cooldown() {
        let mut state = ZoneState::new(Zone::Evaporator);
        let config = test_config();

        let mut fired_at = Vec::new();
        for i in 0..62 {
            let t = i * 10;
            if step(&mut state, &config, -26.0, t).is_some() {
                fired_at.push(t);
            }
        }

        // First at the 2nd sample (t=10), then nothing until the 300s
        // cooldown has fully elapsed.
        assert_eq!(fired_at, vec![10, 310, 610]);
    }

    #[test]
    fn below_threshold_run_never_fires() {
        let mut state = ZoneState::new(Zone::Evaporator);
        let config = AlertConfig {
            consecutive_critical_threshold: 5,
            ..test_config()
        };

        for i in 0..4 {
            assert!(step(&mut state, &config, -26.0, i * 10).is_none());
        }
        assert!(step(&mut state, &config, -26.0, 40).is_some());
    }

    #[test]
    fn disabled_alerts_never_fire() {
        let mut state = ZoneState::new(Zone::Evaporator);
        let config = AlertConfig {
            enabled: false,
            ..test_config()
        };

        for i in 0..10 {
            assert!(step(&mut state, &config, -26.0, i * 10).is_none());
        }
        assert_eq!(state.last_alert_at, None);
    }

    #[test]
    fn clock_skew_counts_as_cooldown_not_elapsed() {
        let mut state = ZoneState::new(Zone::Evaporator);
        let config = test_config();

        assert!(step(&mut state, &config, -26.0, 0).is_none());
        assert!(step(&mut state, &config, -26.0, 10).is_some());

        // Clock jumps backwards past the last alert: suppress.
        assert!(step(&mut state, &config, -26.0, -500).is_none());
    }

    #[test]
    fn zones_are_independent() {
        let config = test_config();
        let thresholds = test_thresholds();
        let reading = reading_at(0, -26.0);

        let mut evaporator = ZoneState::new(Zone::Evaporator);
        let mut condenser = ZoneState::new(Zone::Condenser);

        evaporator.observe(Status::Critical);
        evaporator.observe(Status::Critical);
        condenser.observe(Status::Critical);
        condenser.observe(Status::Critical);

        let first =
            AlertDecisionEngine::evaluate(&mut evaporator, &config, &reading, &thresholds, at(0));
        assert!(first.is_some());

        // The evaporator firing must not start a cooldown for the condenser.
        let second =
            AlertDecisionEngine::evaluate(&mut condenser, &config, &reading, &thresholds, at(0));
        assert!(second.is_some());
        assert_eq!(condenser.last_alert_at, Some(at(0)));
    }

    #[test]
    fn zero_cooldown_fires_every_eligible_sample() {
        let mut state = ZoneState::new(Zone::Evaporator);
        let config = AlertConfig {
            cooldown_seconds: 0,
            ..test_config()
        };

        assert!(step(&mut state, &config, -26.0, 0).is_none());
        assert!(step(&mut state, &config, -26.0, 10).is_some());
        assert!(step(&mut state, &config, -26.0, 20).is_some());
    }
}
