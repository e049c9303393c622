// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::MonitorError;
use crate::zones::{Zone, ZoneMap};

/// Main application configuration
///
/// The monitoring loop treats this as an immutable snapshot per tick; a
/// live edit takes effect on the next tick without resetting zone state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Freezer unit metadata shown in alerts
    pub freezer: FreezerInfo,

    /// Per-zone classification thresholds
    pub thresholds: ZoneMap<ZoneThresholds>,

    /// Data collection cadence
    pub collection: CollectionConfig,

    /// Alert throttling policy
    pub alerts: AlertConfig,

    /// SMTP delivery settings
    pub email: EmailConfig,

    /// History retention
    pub history: HistoryConfig,

    /// Simulated data source settings
    pub simulation: SimulationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            freezer: FreezerInfo::default(),
            thresholds: ZoneMap::new(
                ZoneThresholds {
                    normal_min: -25.0,
                    normal_max: -15.0,
                    critical_low: -30.0,
                    critical_high: -10.0,
                },
                ZoneThresholds {
                    normal_min: 20.0,
                    normal_max: 40.0,
                    critical_low: 15.0,
                    critical_high: 50.0,
                },
                ZoneThresholds {
                    normal_min: 18.0,
                    normal_max: 30.0,
                    critical_low: 10.0,
                    critical_high: 35.0,
                },
            ),
            collection: CollectionConfig::default(),
            alerts: AlertConfig::default(),
            email: EmailConfig::default(),
            history: HistoryConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("frostguard"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate invariants before the config is handed to the engine.
    /// A config that fails here is rejected whole, never partially applied.
    pub fn validate(&self) -> Result<(), MonitorError> {
        for zone in Zone::ALL {
            self.thresholds[zone].validate(zone)?;
        }
        self.alerts.validate()?;
        Ok(())
    }
}

/// Freezer unit metadata, embedded in alert messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezerInfo {
    pub model_name: String,
    pub location: String,
    pub operator_name: String,
    pub operator_contact: String,
}

impl Default for FreezerInfo {
    fn default() -> Self {
        Self {
            model_name: "Industrial Freezer Model X".to_string(),
            location: "Main Storage Facility".to_string(),
            operator_name: "Operations Team".to_string(),
            operator_contact: "operator@example.com".to_string(),
        }
    }
}

/// Classification bounds for one zone, in °C
///
/// Invariant: `critical_low <= normal_min <= normal_max <= critical_high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneThresholds {
    pub normal_min: f64,
    pub normal_max: f64,
    pub critical_low: f64,
    pub critical_high: f64,
}

impl ZoneThresholds {
    pub fn validate(&self, zone: Zone) -> Result<(), MonitorError> {
        let ordered = self.critical_low <= self.normal_min
            && self.normal_min <= self.normal_max
            && self.normal_max <= self.critical_high;
        if !ordered {
            return Err(MonitorError::InvalidConfig(format!(
                "{zone}: thresholds must satisfy critical_low <= normal_min <= normal_max <= critical_high \
                 (got {} <= {} <= {} <= {})",
                self.critical_low, self.normal_min, self.normal_max, self.critical_high
            )));
        }
        Ok(())
    }
}

/// Data collection cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Seconds between readings
    pub reading_interval_seconds: u64,

    /// How many recent records dashboard-style readers fetch
    pub max_recent_display: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            reading_interval_seconds: 5,
            max_recent_display: 30,
        }
    }
}

/// Alert throttling policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Master switch for alert emission
    pub enabled: bool,

    /// Minimum seconds between two alerts for the same zone
    pub cooldown_seconds: u64,

    /// Run length of CRITICAL samples required before an alert may fire.
    /// Suppresses single-sample sensor noise.
    pub consecutive_critical_threshold: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_seconds: 300,
            consecutive_critical_threshold: 2,
        }
    }
}

impl AlertConfig {
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.consecutive_critical_threshold == 0 {
            return Err(MonitorError::InvalidConfig(
                "alerts.consecutive_critical_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// SMTP delivery settings
///
/// The account password is never stored here; it is read from the
/// `SMTP_PASSWORD` environment variable at send time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub use_tls: bool,
    pub sender_email: String,
    pub recipient_emails: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            use_tls: true,
            sender_email: String::new(),
            recipient_emails: Vec::new(),
        }
    }
}

/// History retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Record evaluated readings at all
    pub enabled: bool,

    /// Maximum age of retained records, in days
    pub retention_days: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            retention_days: 30,
        }
    }
}

/// Simulated data source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Normal operating band for the evaporator walk
    pub normal_evaporator_min: f64,
    pub normal_evaporator_max: f64,

    /// Chance per reading of entering failure mode
    pub failure_probability: f64,

    /// How long an injected failure lasts
    pub failure_duration_seconds: u64,

    /// Uniform jitter applied to each generated value, +/- °C
    pub temp_variation_range: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            normal_evaporator_min: -20.0,
            normal_evaporator_max: -15.0,
            failure_probability: 0.05,
            failure_duration_seconds: 60,
            temp_variation_range: 0.5,
        }
    }
}
