//! Multi-topic publish/subscribe hub
//!
//! Each subscriber owns a bounded queue. Publishing never blocks: a full
//! queue drops the message for that subscriber only, and a closed queue gets
//! the subscriber pruned from the registry. The hub retains nothing for
//! topics without subscribers; snapshots for new subscribers are supplied by
//! the persistence collaborator, not replayed from here.

use crate::subscription::Subscription;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Default per-subscriber queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Multi-topic broadcaster
#[derive(Clone)]
pub struct Broadcaster<T> {
    inner: Arc<Registry<T>>,
}

pub(crate) struct Registry<T> {
    topics: RwLock<HashMap<String, HashMap<u64, mpsc::Sender<T>>>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl<T> Registry<T> {
    /// Remove one subscriber, dropping the topic entry when it empties
    pub(crate) fn remove(&self, topic: &str, id: u64) {
        let mut topics = self.topics.write();
        if let Some(subscribers) = topics.get_mut(topic) {
            subscribers.remove(&id);
            if subscribers.is_empty() {
                topics.remove(topic);
            }
        }
    }
}

impl<T: Clone + Send + 'static> Broadcaster<T> {
    /// Create a broadcaster with the default per-subscriber queue capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a broadcaster with a custom per-subscriber queue capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Registry {
                topics: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                capacity: capacity.max(1),
            }),
        }
    }

    /// Publish a message to every subscriber of a topic. Non-blocking and
    /// fire-and-forget: slow subscribers lose the message individually, dead
    /// subscribers are pruned, and zero subscribers is not an error.
    pub fn publish(&self, topic: &str, message: T) {
        // Snapshot the senders so a subscriber disconnecting mid-publish
        // cannot corrupt iteration.
        let senders: Vec<(u64, mpsc::Sender<T>)> = {
            let topics = self.inner.topics.read();
            match topics.get(topic) {
                Some(subscribers) => subscribers
                    .iter()
                    .map(|(id, tx)| (*id, tx.clone()))
                    .collect(),
                None => return,
            }
        };

        let mut stale = Vec::new();
        for (id, tx) in senders {
            match tx.try_send(message.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!(topic, subscriber = id, "queue full, message dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    stale.push(id);
                }
            }
        }

        for id in stale {
            debug!(topic, subscriber = id, "pruning disconnected subscriber");
            self.inner.remove(topic, id);
        }
    }

    /// Register a new subscriber on a topic
    pub fn subscribe(&self, topic: impl Into<String>) -> Subscription<T> {
        let topic = topic.into();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(self.inner.capacity);

        self.inner
            .topics
            .write()
            .entry(topic.clone())
            .or_default()
            .insert(id, tx);

        debug!(topic, subscriber = id, "subscriber registered");
        Subscription::new(topic, id, rx, Arc::clone(&self.inner))
    }

    /// Number of registered subscribers on a topic
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner
            .topics
            .read()
            .get(topic)
            .map_or(0, |subscribers| subscribers.len())
    }
}

impl<T: Clone + Send + 'static> Default for Broadcaster<T> {
    fn default() -> Self {
        Self::new()
    }
}
