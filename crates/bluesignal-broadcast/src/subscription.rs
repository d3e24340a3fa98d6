//! Subscriber handle
//!
//! A subscription blocks cooperatively on its own queue, waking on the next
//! message or on the keepalive deadline, whichever comes first. This is the
//! only intentional blocking wait in the core; publishing never blocks.
//! Dropping the handle unregisters it from the hub.

use crate::hub::Registry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// What a subscriber observes on each wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent<T> {
    /// A published message
    Message(T),

    /// No message arrived within the keepalive window
    Keepalive,

    /// The hub side of the queue is gone; no transition back from here
    Closed,
}

/// Handle to one topic subscription
pub struct Subscription<T> {
    topic: String,
    id: u64,
    rx: mpsc::Receiver<T>,
    registry: Arc<Registry<T>>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(
        topic: String,
        id: u64,
        rx: mpsc::Receiver<T>,
        registry: Arc<Registry<T>>,
    ) -> Self {
        Self {
            topic,
            id,
            rx,
            registry,
        }
    }

    /// Topic this subscription is registered on
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Wait for the next message, yielding a keepalive marker when the idle
    /// window elapses first
    pub async fn next(&mut self, keepalive: Duration) -> StreamEvent<T> {
        match timeout(keepalive, self.rx.recv()).await {
            Ok(Some(message)) => StreamEvent::Message(message),
            Ok(None) => StreamEvent::Closed,
            Err(_) => StreamEvent::Keepalive,
        }
    }

    /// Close the receiving half without unregistering (simulates a subscriber
    /// whose queue died before the registry noticed)
    #[cfg(test)]
    pub(crate) fn close(&mut self) {
        self.rx.close();
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.registry.remove(&self.topic, self.id);
    }
}
