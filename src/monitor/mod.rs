//! Monitoring core - classification, zone state, alert decisions, loop

mod alerts;
mod classify;
mod engine;
mod state;

pub use alerts::{AlertDecisionEngine, AlertEvent};
pub use classify::classify;
pub use engine::{EngineStats, MonitorEngine};
pub use state::{ZoneState, ZoneStates};
