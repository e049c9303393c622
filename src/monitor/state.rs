// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Per-zone rolling state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::zones::{Status, Zone, ZoneMap};

/// Rolling state for one zone: the latest classification, the current
/// run of CRITICAL samples, and when this zone last alerted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneState {
    pub zone: Zone,
    pub current_status: Status,
    pub consecutive_critical: u32,
    pub last_alert_at: Option<DateTime<Utc>>,
}

impl ZoneState {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            current_status: Status::Ok,
            consecutive_critical: 0,
            last_alert_at: None,
        }
    }

    /// Fold one classification into the state.
    ///
    /// A CRITICAL sample extends the run; anything else breaks it.
    /// `last_alert_at` is owned by the alert decision engine and is not
    /// touched here, so the transition stays a pure function of
    /// (state, status).
    pub fn observe(&mut self, status: Status) {
        if status == Status::Critical {
            self.consecutive_critical += 1;
        } else {
            self.consecutive_critical = 0;
        }
        self.current_status = status;
    }
}

/// The full set of zone states, one per configured zone.
///
/// The monitoring loop is the only writer; readers get cloned snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneStates {
    states: ZoneMap<ZoneState>,
}

impl ZoneStates {
    pub fn new() -> Self {
        Self {
            states: ZoneMap::from_fn(ZoneState::new),
        }
    }

    pub fn get(&self, zone: Zone) -> &ZoneState {
        &self.states[zone]
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut ZoneState {
        &mut self.states[zone]
    }

    /// Reset counters and alert timestamps, e.g. on a configuration reload
    pub fn reset(&mut self) {
        self.states = ZoneMap::from_fn(ZoneState::new);
    }

    /// Current status of every zone
    pub fn statuses(&self) -> ZoneMap<Status> {
        ZoneMap::from_fn(|zone| self.states[zone].current_status)
    }
}

impl Default for ZoneStates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_extends_run_others_break_it() {
        let mut state = ZoneState::new(Zone::Evaporator);

        state.observe(Status::Critical);
        state.observe(Status::Critical);
        assert_eq!(state.consecutive_critical, 2);
        assert_eq!(state.current_status, Status::Critical);

        state.observe(Status::Warning);
        assert_eq!(state.consecutive_critical, 0);
        assert_eq!(state.current_status, Status::Warning);

        state.observe(Status::Ok);
        assert_eq!(state.consecutive_critical, 0);
    }

    #[test]
    fn observe_does_not_touch_last_alert_at() {
        let mut state = ZoneState::new(Zone::Condenser);
        state.last_alert_at = Some(Utc::now());
        let before = state.last_alert_at;

        state.observe(Status::Critical);
        state.observe(Status::Ok);
        assert_eq!(state.last_alert_at, before);
    }

    #[test]
    fn same_sequence_yields_same_final_state() {
        let sequence = [
            Status::Critical,
            Status::Ok,
            Status::Critical,
            Status::Critical,
            Status::Warning,
            Status::Critical,
        ];

        let run = || {
            let mut state = ZoneState::new(Zone::Ambient);
            for status in sequence {
                state.observe(status);
            }
            (state.current_status, state.consecutive_critical)
        };

        assert_eq!(run(), run());
        assert_eq!(run(), (Status::Critical, 1));
    }

    #[test]
    fn states_cover_every_zone_and_reset() {
        let mut states = ZoneStates::new();
        for zone in Zone::ALL {
            assert_eq!(states.get(zone).zone, zone);
            assert_eq!(states.get(zone).current_status, Status::Ok);
        }

        states.get_mut(Zone::Ambient).observe(Status::Critical);
        assert_eq!(states.get(Zone::Ambient).consecutive_critical, 1);

        states.reset();
        assert_eq!(states.get(Zone::Ambient).consecutive_critical, 0);
    }
}
