// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! Alert delivery channels

mod email;

pub use email::EmailNotifier;

use async_trait::async_trait;
use tracing::warn;

use crate::monitor::AlertEvent;

/// Delivery failure for one alert. Delivery is best effort: the
/// monitoring loop logs these and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Channel is missing required settings (sender, recipients, password)
    #[error("Notifier not configured: {0}")]
    NotConfigured(String),

    /// SMTP transport-level failure (authentication, connection, etc.)
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient address could not be parsed
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled
    #[error("Email build error: {0}")]
    Build(String),
}

/// A sink for alert events
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, event: &AlertEvent) -> Result<(), NotifyError>;
}

/// Writes alerts to the log instead of an external channel. The default
/// when email is not configured, and useful in demos.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, event: &AlertEvent) -> Result<(), NotifyError> {
        warn!(
            alert_id = %event.id,
            zone = %event.zone,
            status = %event.status,
            temperature = event.reading.value(event.zone),
            "ALERT: {} zone is {} at {:.1}°C (normal {:.1}..{:.1})",
            event.zone,
            event.status,
            event.reading.value(event.zone),
            event.thresholds.normal_min,
            event.thresholds.normal_max,
        );
        Ok(())
    }
}

/// Chains several channels, attempting all of them for every event.
/// Succeeds if at least one channel accepted the alert.
pub struct MultiNotifier {
    channels: Vec<Box<dyn Notifier>>,
}

impl MultiNotifier {
    pub fn new(channels: Vec<Box<dyn Notifier>>) -> Self {
        Self { channels }
    }
}

#[async_trait]
impl Notifier for MultiNotifier {
    async fn send(&self, event: &AlertEvent) -> Result<(), NotifyError> {
        if self.channels.is_empty() {
            return Err(NotifyError::NotConfigured(
                "no delivery channels".to_string(),
            ));
        }

        let mut delivered = false;
        let mut last_err = None;
        for channel in &self.channels {
            match channel.send(event).await {
                Ok(()) => delivered = true,
                Err(e) => {
                    warn!(zone = %event.zone, "Alert channel failed: {}", e);
                    last_err = Some(e);
                }
            }
        }

        match (delivered, last_err) {
            (true, _) => Ok(()),
            (false, Some(e)) => Err(e),
            (false, None) => unreachable!("non-empty channel list produced no results"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::monitor::AlertEvent;
    use crate::zones::{Reading, Status, Zone, ZoneMap};
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    fn event() -> AlertEvent {
        let config = Config::default();
        let reading = Reading::new(Utc::now(), ZoneMap::new(-8.0, 30.0, 24.0));
        AlertEvent {
            id: Uuid::new_v4(),
            timestamp: reading.timestamp,
            zone: Zone::Evaporator,
            status: Status::Critical,
            reading,
            thresholds: config.thresholds[Zone::Evaporator],
        }
    }

    struct CountingNotifier {
        sent: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        async fn send(&self, _event: &AlertEvent) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::NotConfigured("test channel down".to_string()));
            }
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn log_notifier_always_accepts() {
        LogNotifier.send(&event()).await.unwrap();
    }

    #[tokio::test]
    async fn multi_notifier_tries_all_channels() {
        let sent = Arc::new(AtomicUsize::new(0));
        let multi = MultiNotifier::new(vec![
            Box::new(CountingNotifier {
                sent: sent.clone(),
                fail: true,
            }),
            Box::new(CountingNotifier {
                sent: sent.clone(),
                fail: false,
            }),
        ]);

        multi.send(&event()).await.unwrap();
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn multi_notifier_fails_when_all_channels_fail() {
        let sent = Arc::new(AtomicUsize::new(0));
        let multi = MultiNotifier::new(vec![Box::new(CountingNotifier { sent, fail: true })]);
        assert!(multi.send(&event()).await.is_err());
    }

    #[tokio::test]
    async fn empty_multi_notifier_is_not_configured() {
        let err = MultiNotifier::new(Vec::new()).send(&event()).await.unwrap_err();
        assert!(matches!(err, NotifyError::NotConfigured(_)));
    }
}
