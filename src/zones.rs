// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Zone and reading types shared across the system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Temperature zones monitored on the freezer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Inside the cold chamber, normally well below zero
    Evaporator,
    /// Heat-rejection coil, normally warm
    Condenser,
    /// Room air around the unit
    Ambient,
}

impl Zone {
    /// All zones, in evaluation order
    pub const ALL: [Zone; 3] = [Zone::Evaporator, Zone::Condenser, Zone::Ambient];

    /// Lowercase identifier used in logs and export columns
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Evaporator => "evaporator",
            Zone::Condenser => "condenser",
            Zone::Ambient => "ambient",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed map with one slot per zone
///
/// Replaces string-keyed lookups with compile-time exhaustiveness: every
/// zone always has exactly one entry and indexing cannot miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneMap<T> {
    pub evaporator: T,
    pub condenser: T,
    pub ambient: T,
}

impl<T> ZoneMap<T> {
    pub fn new(evaporator: T, condenser: T, ambient: T) -> Self {
        Self {
            evaporator,
            condenser,
            ambient,
        }
    }

    /// Build a map by evaluating `f` once per zone
    pub fn from_fn(mut f: impl FnMut(Zone) -> T) -> Self {
        Self {
            evaporator: f(Zone::Evaporator),
            condenser: f(Zone::Condenser),
            ambient: f(Zone::Ambient),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, &T)> {
        [
            (Zone::Evaporator, &self.evaporator),
            (Zone::Condenser, &self.condenser),
            (Zone::Ambient, &self.ambient),
        ]
        .into_iter()
    }
}

impl<T> Index<Zone> for ZoneMap<T> {
    type Output = T;

    fn index(&self, zone: Zone) -> &T {
        match zone {
            Zone::Evaporator => &self.evaporator,
            Zone::Condenser => &self.condenser,
            Zone::Ambient => &self.ambient,
        }
    }
}

impl<T> IndexMut<Zone> for ZoneMap<T> {
    fn index_mut(&mut self, zone: Zone) -> &mut T {
        match zone {
            Zone::Evaporator => &mut self.evaporator,
            Zone::Condenser => &mut self.condenser,
            Zone::Ambient => &mut self.ambient,
        }
    }
}

impl<T: Default> Default for ZoneMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

/// Classification of a zone reading against its thresholds
///
/// Totally ordered: OK < Warning < Critical, so the worst zone status is
/// simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Ok,
    Warning,
    Critical,
}

impl Status {
    /// Uppercase form used in logs, export columns and alert bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timestamped measurement of all three zones, in °C
///
/// Immutable once created; the monitoring loop snapshots it into history
/// records and alert events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub temps: ZoneMap<f64>,
    /// Set by the simulator while a failure scenario is being injected
    pub failure_mode: bool,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, temps: ZoneMap<f64>) -> Self {
        Self {
            timestamp,
            temps,
            failure_mode: false,
        }
    }

    pub fn value(&self, zone: Zone) -> f64 {
        self.temps[zone]
    }
}
