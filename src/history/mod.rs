// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! In-memory history of evaluated readings with retention pruning

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

use crate::error::MonitorError;
use crate::zones::{Status, Zone, ZoneMap};

/// One evaluated reading: temperatures plus the status each zone was
/// classified as at the time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub temps: ZoneMap<f64>,
    pub statuses: ZoneMap<Status>,
    /// Worst status across all zones
    pub overall: Status,
    pub failure_mode: bool,
}

impl HistoryRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        temps: ZoneMap<f64>,
        statuses: ZoneMap<Status>,
        failure_mode: bool,
    ) -> Self {
        let overall = Zone::ALL
            .into_iter()
            .map(|zone| statuses[zone])
            .max()
            .unwrap_or(Status::Ok);
        Self {
            timestamp,
            temps,
            statuses,
            overall,
            failure_mode,
        }
    }
}

/// Per-zone summary over a queried window
#[derive(Debug, Clone, Serialize)]
pub struct ZoneStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Aggregate summary over a queried window
#[derive(Debug, Clone, Serialize)]
pub struct HistoryStatistics {
    pub zones: ZoneMap<ZoneStatistics>,
    pub total_readings: usize,
    pub critical_events: usize,
    pub warning_events: usize,
}

/// Append-only, time-ordered store of evaluated readings.
///
/// The monitoring loop is the single writer; concurrent readers
/// (dashboard refresh, export) take copy-on-read snapshots of only the
/// range they ask for, so the writer is never locked out for long.
/// Timestamps are non-decreasing: appends strictly older than the
/// latest record are rejected.
pub struct HistoryStore {
    records: RwLock<VecDeque<HistoryRecord>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
        }
    }

    /// Append one record. O(1) amortized.
    pub fn append(&self, record: HistoryRecord) -> Result<(), MonitorError> {
        let mut records = self.records.write();
        if let Some(last) = records.back() {
            if record.timestamp < last.timestamp {
                return Err(MonitorError::OutOfOrder {
                    last: last.timestamp,
                    attempted: record.timestamp,
                });
            }
        }
        records.push_back(record);
        Ok(())
    }

    /// Drop records older than `now - retention`. Returns how many were
    /// removed; a no-op on an empty store.
    pub fn prune(&self, retention: Duration, now: DateTime<Utc>) -> usize {
        let cutoff = now - retention;
        let mut records = self.records.write();
        let mut removed = 0;
        while records
            .front()
            .is_some_and(|record| record.timestamp < cutoff)
        {
            records.pop_front();
            removed += 1;
        }
        if removed > 0 {
            debug!("Pruned {} records older than {}", removed, cutoff);
        }
        removed
    }

    /// Records with timestamp in `[start, end]`, ascending.
    ///
    /// The bounds are located by binary search over the ordered window,
    /// so only the requested range is copied out of the lock.
    pub fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<HistoryRecord> {
        if start > end {
            return Vec::new();
        }
        let records = self.records.read();
        let lo = records.partition_point(|record| record.timestamp < start);
        let hi = records.partition_point(|record| record.timestamp <= end);
        records.range(lo..hi).cloned().collect()
    }

    /// The most recent `count` records, ascending
    pub fn recent(&self, count: usize) -> Vec<HistoryRecord> {
        let records = self.records.read();
        let skip = records.len().saturating_sub(count);
        records.range(skip..).cloned().collect()
    }

    /// Timestamp of the newest retained record
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.records.read().back().map(|record| record.timestamp)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Per-zone min/max/mean/std and event counts over `[start, end]`.
    /// Returns `None` when the range holds no records.
    pub fn statistics(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Option<HistoryStatistics> {
        let window = self.query(start, end);
        if window.is_empty() {
            return None;
        }

        let zones = ZoneMap::from_fn(|zone| {
            let values: Vec<f64> = window.iter().map(|record| record.temps[zone]).collect();
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let std_dev = if values.len() > 1 {
                let variance = values
                    .iter()
                    .map(|v| (v - mean).powi(2))
                    .sum::<f64>()
                    / (values.len() - 1) as f64;
                variance.sqrt()
            } else {
                0.0
            };
            ZoneStatistics {
                min,
                max,
                mean,
                std_dev,
            }
        });

        Some(HistoryStatistics {
            zones,
            total_readings: window.len(),
            critical_events: window
                .iter()
                .filter(|record| record.overall == Status::Critical)
                .count(),
            warning_events: window
                .iter()
                .filter(|record| record.overall == Status::Warning)
                .count(),
        })
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
