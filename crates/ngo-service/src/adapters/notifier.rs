//! Notifier adapters
//!
//! [`SmtpNotifier`] delivers through an SMTP relay with lettre's async Tokio
//! transport. [`LogNotifier`] only logs, for development and tests.

use async_trait::async_trait;
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};
use ngo_common::MailConfig;
use ngo_core::{Notifier, NotifyError};
use tracing::{debug, info};

/// Port that uses implicit TLS; every other port negotiates STARTTLS
const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP notifier
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build a transport from mail configuration
    ///
    /// # Errors
    /// Returns an error if the host is missing or the from address is invalid
    pub fn from_config(config: &MailConfig) -> Result<Self, NotifyError> {
        let host = config
            .smtp_host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| NotifyError::Delivery("SMTP host is not configured".to_string()))?;

        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::InvalidAddress(format!("{}: {e}", config.from)))?;

        let relay = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        };
        let builder = relay
            .map_err(|e| NotifyError::Delivery(e.to_string()))?
            .port(config.smtp_port);

        let builder = match (&config.smtp_username, &config.smtp_password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        info!(host = %host, port = config.smtp_port, "SMTP notifier configured");

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::InvalidAddress(format!("{to}: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        debug!(subject = %subject, "Mail delivered");
        Ok(())
    }
}

/// Notifier that writes messages to the log instead of sending them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        info!(
            to = %to,
            subject = %subject,
            body_len = body.len(),
            "Mail delivery disabled, message logged"
        );
        Ok(())
    }
}
