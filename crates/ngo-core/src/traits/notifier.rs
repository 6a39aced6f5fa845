//! Notifier port - outbound messages to people

use async_trait::async_trait;

/// Notification delivery errors
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Sends a message to an e-mail address.
///
/// Callers treat delivery as best effort: failures are logged, never raised to
/// the operation that triggered them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}
