//! # Notifier
//!
//! Booking confirmations leave the system through a [`Notifier`]. The engine
//! never calls it directly: it drops a [`Notification`] on the
//! [`NotificationQueue`] and the [`NotificationDispatcher`] worker delivers it
//! on its own task. A slow, failing or absent transport therefore never holds
//! up or rolls back a reservation.
//!
//! Two notifiers ship with the crate:
//! - [`TracingNotifier`] writes each message to the log.
//! - [`RecordingNotifier`] keeps messages in memory and can be told to fail or
//!   stall.

pub mod dispatcher;
pub mod recording;

pub use dispatcher::{DispatchStats, NotificationDispatcher, NotificationQueue};
pub use recording::RecordingNotifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors a transport can report for a single message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotifyError {
    #[error("Delivery to {to} failed: {reason}")]
    Delivery { to: String, reason: String },

    #[error("Delivery to {to} timed out")]
    TimedOut { to: String },
}

/// A message transport.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// One queued message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Sender identity and the booking-confirmation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailConfig {
    pub sender_name: String,
    pub sender_address: String,
    pub subject: String,
    pub body: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender_name: "ReservationManager".to_string(),
            sender_address: "reservations@localhost".to_string(),
            subject: "Reservation".to_string(),
            body: "Successful reservation!".to_string(),
        }
    }
}

impl MailConfig {
    /// `Name <address>`, as it appears in a `From` header.
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.sender_name, self.sender_address)
    }

    /// The confirmation sent to one client of a new reservation.
    pub fn confirmation(&self, to: &str) -> Notification {
        Notification {
            to: to.to_string(),
            subject: self.subject.clone(),
            body: self.body.clone(),
        }
    }
}

/// Logs each message instead of sending it.
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    from: String,
}

impl TracingNotifier {
    pub fn new(mail: &MailConfig) -> Self {
        Self {
            from: mail.from_header(),
        }
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        info!(from = %self.from, to, subject, body, "Mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mail_text() {
        let mail = MailConfig::default();
        assert_eq!(mail.from_header(), "ReservationManager <reservations@localhost>");

        let note = mail.confirmation("ana@example.com");
        assert_eq!(note.to, "ana@example.com");
        assert_eq!(note.subject, "Reservation");
        assert_eq!(note.body, "Successful reservation!");
    }

    #[tokio::test]
    async fn test_tracing_notifier_always_succeeds() {
        let notifier = TracingNotifier::new(&MailConfig::default());
        assert!(notifier.send("a@b.c", "s", "b").await.is_ok());
    }
}
