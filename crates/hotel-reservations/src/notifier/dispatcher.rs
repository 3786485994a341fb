//! Queue and worker that deliver notifications off the commit path.

use super::{Notification, Notifier, NotifyError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

/// Sending half of the notification queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    sender: mpsc::Sender<Notification>,
}

impl NotificationQueue {
    /// Queues a message without waiting.
    ///
    /// When the queue is full the message is handed to a spawned task that
    /// waits for room, so every message is still attempted. Returns `false`
    /// and logs a warning only when the dispatcher has stopped.
    pub fn enqueue(&self, notification: Notification) -> bool {
        match self.sender.try_send(notification) {
            Ok(()) => true,
            Err(TrySendError::Full(n)) => {
                debug!(to = %n.to, "Notification queue full, sending in background");
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    if let Err(mpsc::error::SendError(n)) = sender.send(n).await {
                        warn!(to = %n.to, "Notification dispatcher stopped, message dropped");
                    }
                });
                true
            }
            Err(TrySendError::Closed(n)) => {
                warn!(to = %n.to, "Notification dispatcher stopped, message dropped");
                false
            }
        }
    }
}

/// What the dispatcher did before its queue closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: usize,
    pub failed: usize,
}

/// Worker that drains the queue and calls the [`Notifier`] once per message.
pub struct NotificationDispatcher {
    receiver: mpsc::Receiver<Notification>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
}

impl NotificationDispatcher {
    /// Creates the worker and its queue. Each send is abandoned after `timeout`.
    pub fn new(
        capacity: usize,
        notifier: Arc<dyn Notifier>,
        timeout: Duration,
    ) -> (Self, NotificationQueue) {
        let (sender, receiver) = mpsc::channel(capacity);
        let dispatcher = Self {
            receiver,
            notifier,
            timeout,
        };
        (dispatcher, NotificationQueue { sender })
    }

    /// Delivers messages until every [`NotificationQueue`] clone is dropped
    /// and the queue is empty.
    pub async fn run(mut self) -> DispatchStats {
        info!(timeout_ms = self.timeout.as_millis() as u64, "Notification dispatcher started");
        let mut stats = DispatchStats::default();

        while let Some(notification) = self.receiver.recv().await {
            debug!(to = %notification.to, "Dispatching notification");
            match self.deliver(&notification).await {
                Ok(()) => {
                    stats.delivered += 1;
                    info!(to = %notification.to, "Notification delivered");
                }
                Err(e) => {
                    stats.failed += 1;
                    warn!(to = %notification.to, error = %e, "Notification failed");
                }
            }
        }

        info!(delivered = stats.delivered, failed = stats.failed, "Notification dispatcher stopped");
        stats
    }

    async fn deliver(&self, n: &Notification) -> Result<(), NotifyError> {
        match tokio::time::timeout(self.timeout, self.notifier.send(&n.to, &n.subject, &n.body))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(NotifyError::TimedOut { to: n.to.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{MailConfig, RecordingNotifier};

    fn note(to: &str) -> Notification {
        MailConfig::default().confirmation(to)
    }

    #[tokio::test]
    async fn test_delivers_in_queue_order() {
        let notifier = RecordingNotifier::new();
        let (dispatcher, queue) =
            NotificationDispatcher::new(8, Arc::new(notifier.clone()), Duration::from_secs(1));
        let worker = tokio::spawn(dispatcher.run());

        assert!(queue.enqueue(note("a@example.com")));
        assert!(queue.enqueue(note("b@example.com")));
        drop(queue);

        let stats = worker.await.unwrap();
        assert_eq!(stats, DispatchStats { delivered: 2, failed: 0 });
        assert_eq!(notifier.recipients(), vec!["a@example.com", "b@example.com"]);
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_raised() {
        let (dispatcher, queue) = NotificationDispatcher::new(
            8,
            Arc::new(RecordingNotifier::failing()),
            Duration::from_secs(1),
        );
        let worker = tokio::spawn(dispatcher.run());

        queue.enqueue(note("a@example.com"));
        drop(queue);

        assert_eq!(worker.await.unwrap(), DispatchStats { delivered: 0, failed: 1 });
    }

    #[tokio::test]
    async fn test_slow_transport_times_out() {
        let notifier = RecordingNotifier::stalling(Duration::from_secs(5));
        let (dispatcher, queue) =
            NotificationDispatcher::new(8, Arc::new(notifier.clone()), Duration::from_millis(20));
        let worker = tokio::spawn(dispatcher.run());

        queue.enqueue(note("a@example.com"));
        drop(queue);

        assert_eq!(worker.await.unwrap(), DispatchStats { delivered: 0, failed: 1 });
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_full_queue_still_delivers_every_message() {
        let notifier = RecordingNotifier::new();
        let (dispatcher, queue) =
            NotificationDispatcher::new(1, Arc::new(notifier.clone()), Duration::from_secs(1));

        for to in ["a@example.com", "b@example.com", "c@example.com"] {
            assert!(queue.enqueue(note(to)));
        }
        let worker = tokio::spawn(dispatcher.run());
        drop(queue);

        let stats = worker.await.unwrap();
        assert_eq!(stats, DispatchStats { delivered: 3, failed: 0 });
        let mut recipients = notifier.recipients();
        recipients.sort();
        assert_eq!(recipients, vec!["a@example.com", "b@example.com", "c@example.com"]);
    }

    #[tokio::test]
    async fn test_closed_queue_drops_message() {
        let (dispatcher, queue) = NotificationDispatcher::new(
            1,
            Arc::new(RecordingNotifier::new()),
            Duration::from_secs(1),
        );

        drop(dispatcher);
        assert!(!queue.enqueue(note("a@example.com")));
    }
}
