// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! FrostGuard - Freezer Thermal Monitoring and Alerting
//!
//! Polls a temperature source on a fixed interval, classifies every
//! zone against configured thresholds, throttles alerts through a
//! consecutive-critical gate and per-zone cooldown, and keeps a pruned
//! in-memory history that can be exported on shutdown.

use anyhow::Result;
use clap::Parser;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use frostguard::{
    Config, EmailNotifier, ExportFormat, HistoryExporter, HistoryStore, LogNotifier,
    MonitorEngine, MultiNotifier, Notifier, TemperatureSimulator, VERSION,
};

/// FrostGuard - Freezer Thermal Monitoring and Alerting
#[derive(Parser, Debug)]
#[command(name = "frostguard")]
#[command(author = "FrostGuard Project")]
#[command(version = VERSION)]
#[command(about = "Freezer thermal monitoring with throttled alerting")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Demo mode: inject failure scenarios aggressively
    #[arg(long)]
    demo: bool,

    /// Seed the simulator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the reading interval, in seconds
    #[arg(long)]
    interval: Option<u64>,

    /// Disable alert emission for this run
    #[arg(long)]
    no_alerts: bool,

    /// Export history to this file on shutdown (.csv or .json)
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("FrostGuard v{} - Freezer Thermal Monitoring", VERSION);

    // Load or create configuration
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if args.demo {
        config.simulation.failure_probability = 0.2;
        config.simulation.failure_duration_seconds = 30;
    }
    if let Some(interval) = args.interval {
        config.collection.reading_interval_seconds = interval;
    }
    if args.no_alerts {
        config.alerts.enabled = false;
    }
    config.validate()?;

    info!("Configuration loaded from {:?}", config_path);
    info!(
        "Monitoring {} at {} every {}s",
        config.freezer.model_name, config.freezer.location, config.collection.reading_interval_seconds
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config, args.seed, args.export))
}

async fn run(config: Config, seed: Option<u64>, export: Option<PathBuf>) -> Result<()> {
    let simulator = match seed {
        Some(seed) => TemperatureSimulator::seeded(
            config.thresholds,
            config.simulation.clone(),
            seed,
        ),
        None => TemperatureSimulator::new(config.thresholds, config.simulation.clone()),
    };

    let notifier = build_notifier(&config);
    let history = Arc::new(HistoryStore::new());
    let engine = Arc::new(MonitorEngine::new(
        Box::new(simulator),
        history.clone(),
        notifier,
    ));

    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let shared_config = Arc::new(RwLock::new(config));

    let loop_handle = tokio::spawn(
        engine
            .clone()
            .run(shared_config.clone(), shutdown_tx.subscribe()),
    );

    info!("Press Ctrl+C to shutdown");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, cleaning up...");

    let _ = shutdown_tx.send(());
    loop_handle.await?;

    if let Some(path) = export {
        let records = history.recent(usize::MAX);
        let exporter = HistoryExporter::new(ExportFormat::from_path(&path));
        exporter.write_to_file(&records, &path)?;
    }

    let stats = engine.stats();
    info!(
        "FrostGuard shutdown complete ({} readings, {} alerts)",
        stats.readings_processed, stats.alerts_fired
    );
    Ok(())
}

/// Email when configured, always the log, tried in that order
fn build_notifier(config: &Config) -> Arc<dyn Notifier> {
    let mut channels: Vec<Box<dyn Notifier>> = Vec::new();

    let email = EmailNotifier::new(config.email.clone(), config.freezer.clone());
    if email.is_configured() {
        info!(
            "Email alerts enabled via {} ({} recipients)",
            config.email.smtp_server,
            config.email.recipient_emails.len()
        );
        channels.push(Box::new(email));
    } else {
        warn!("Email not configured, alerts go to the log only");
    }
    channels.push(Box::new(LogNotifier));

    Arc::new(MultiNotifier::new(channels))
}
