// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! FrostGuard - Freezer Thermal Monitoring and Alerting
//!
//! Continuous monitoring for industrial freezers:
//! - Three-zone classification (evaporator, condenser, ambient) against
//!   configurable thresholds
//! - Alert throttling with a consecutive-critical gate and per-zone
//!   cooldown, so noisy sensors do not page anyone twice
//! - In-memory history with retention pruning, range queries and
//!   summary statistics
//! - SMTP email and log delivery channels
//! - A simulated data source with failure-scenario injection for demos
//!   and testing
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────────────────────┐   ┌──────────┐
//! │ DataSource │ → │ MonitorEngine                │ → │ Notifier │
//! │ (simulated │   │  classify → observe → alert  │   │ (email,  │
//! │  or real)  │   │                              │   │  log)    │
//! └────────────┘   └──────────────┬───────────────┘   └──────────┘
//!                                 ↓
//!                        ┌──────────────┐   ┌──────────┐
//!                        │ HistoryStore │ → │ Exporter │
//!                        └──────────────┘   └──────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod monitor;
pub mod notify;
pub mod sim;
pub mod zones;

// Re-exports for convenience
pub use config::Config;
pub use error::MonitorError;
pub use export::{ExportFormat, HistoryExporter};
pub use history::{HistoryRecord, HistoryStatistics, HistoryStore};
pub use monitor::{AlertDecisionEngine, AlertEvent, MonitorEngine, ZoneState, ZoneStates};
pub use notify::{EmailNotifier, LogNotifier, MultiNotifier, Notifier};
pub use sim::{DataSource, TemperatureSimulator};
pub use zones::{Reading, Status, Zone, ZoneMap};

/// FrostGuard version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// FrostGuard name
pub const NAME: &str = "FrostGuard";
