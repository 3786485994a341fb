//! In-memory [`Notifier`] for tests and the demo.

use super::{Notification, Notifier, NotifyError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Behavior {
    Deliver,
    Fail,
    Stall(Duration),
}

/// Records every message it is asked to send.
///
/// Clones share the same record, so a test can keep one clone and hand the
/// other to the system.
#[derive(Debug, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    behavior: Behavior,
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            behavior: Behavior::Deliver,
        }
    }

    /// Every send fails with [`NotifyError::Delivery`]. Nothing is recorded.
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            ..Self::new()
        }
    }

    /// Every send waits `delay` before recording the message.
    pub fn stalling(delay: Duration) -> Self {
        Self {
            behavior: Behavior::Stall(delay),
            ..Self::new()
        }
    }

    /// Messages delivered so far, in delivery order.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent().into_iter().map(|n| n.to).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        match self.behavior {
            Behavior::Deliver => {}
            Behavior::Fail => {
                return Err(NotifyError::Delivery {
                    to: to.to_string(),
                    reason: "transport refused the message".to_string(),
                })
            }
            Behavior::Stall(delay) => tokio::time::sleep(delay).await,
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(Notification {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }
        Ok(())
    }
}
