// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/frostguard

//! SMTP alert delivery via the `lettre` async transport.
//!
//! The SMTP password is never stored in the config file; it is read
//! from the `SMTP_PASSWORD` environment variable at send time.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use crate::config::{EmailConfig, FreezerInfo};
use crate::monitor::AlertEvent;
use crate::notify::{Notifier, NotifyError};
use crate::zones::Zone;

/// Environment variable holding the SMTP password
const SMTP_PASSWORD_VAR: &str = "SMTP_PASSWORD";

/// Sends plain-text alert emails over SMTP with STARTTLS.
pub struct EmailNotifier {
    email: EmailConfig,
    freezer: FreezerInfo,
}

impl EmailNotifier {
    pub fn new(email: EmailConfig, freezer: FreezerInfo) -> Self {
        Self { email, freezer }
    }

    fn smtp_password() -> Option<String> {
        std::env::var(SMTP_PASSWORD_VAR)
            .ok()
            .filter(|p| !p.is_empty())
    }

    /// Whether enough settings are present to attempt delivery
    pub fn is_configured(&self) -> bool {
        !self.email.smtp_server.is_empty()
            && !self.email.sender_email.is_empty()
            && !self.email.recipient_emails.is_empty()
    }

    fn subject(&self, event: &AlertEvent) -> String {
        format!(
            "[{}] {} ALERT: {} zone at {:.1}°C",
            self.freezer.model_name,
            event.status,
            event.zone,
            event.reading.value(event.zone),
        )
    }

    fn body(&self, event: &AlertEvent) -> String {
        let mut body = format!(
            "Freezer alert from {}\n\
             Location: {}\n\
             Time: {}\n\n\
             Triggering zone: {} ({})\n\
             Reading: {:.1}°C\n\
             Normal range: {:.1}°C to {:.1}°C\n\
             Critical outside: {:.1}°C to {:.1}°C\n\n\
             All zones:\n",
            self.freezer.model_name,
            self.freezer.location,
            event.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            event.zone,
            event.status,
            event.reading.value(event.zone),
            event.thresholds.normal_min,
            event.thresholds.normal_max,
            event.thresholds.critical_low,
            event.thresholds.critical_high,
        );
        for zone in Zone::ALL {
            body.push_str(&format!(
                "  {:<11} {:.1}°C\n",
                zone.label(),
                event.reading.value(zone)
            ));
        }
        if event.reading.failure_mode {
            body.push_str("\nNote: a simulated failure scenario is active.\n");
        }
        body.push_str(&format!(
            "\nContact: {} <{}>\n",
            self.freezer.operator_name, self.freezer.operator_contact
        ));
        body
    }

    fn build_message(&self, event: &AlertEvent) -> Result<Message, NotifyError> {
        let mut builder = Message::builder()
            .from(self.email.sender_email.parse()?)
            .subject(self.subject(event))
            .header(ContentType::TEXT_PLAIN);
        for recipient in &self.email.recipient_emails {
            builder = builder.to(recipient.parse()?);
        }
        builder
            .body(self.body(event))
            .map_err(|e| NotifyError::Build(e.to_string()))
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
        let mut builder = if self.email.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.email.smtp_server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.email.smtp_server)
        };
        builder = builder.port(self.email.smtp_port);

        if let Some(password) = Self::smtp_password() {
            builder = builder.credentials(Credentials::new(
                self.email.sender_email.clone(),
                password,
            ));
        }
        Ok(builder.build())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, event: &AlertEvent) -> Result<(), NotifyError> {
        if !self.is_configured() {
            return Err(NotifyError::NotConfigured(
                "sender or recipients missing from email settings".to_string(),
            ));
        }

        let message = self.build_message(event)?;
        let mailer = self.build_transport()?;
        mailer.send(message).await?;

        info!(
            zone = %event.zone,
            recipients = self.email.recipient_emails.len(),
            "Alert email sent"
        );
        Ok(())
    }
}
