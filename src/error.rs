// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Error taxonomy for the monitoring core

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::zones::Zone;

/// Errors raised by the evaluation and history layers
///
/// All variants are local and recoverable: the monitoring loop logs them
/// and moves on rather than halting.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A zone value was NaN or infinite; comparisons against the
    /// thresholds would be meaningless, so the zone's evaluation is
    /// skipped for the tick.
    #[error("invalid reading for {zone}: {value} is not a finite temperature")]
    InvalidReading { zone: Zone, value: f64 },

    /// A history append carried a timestamp earlier than the latest
    /// retained record. Rejected, never silently reordered.
    #[error("out-of-order append at {attempted}, store already holds {last}")]
    OutOfOrder {
        last: DateTime<Utc>,
        attempted: DateTime<Utc>,
    },

    /// Configuration violated an invariant (threshold ordering, alert
    /// settings). Caught at the boundary before reaching the evaluator.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
