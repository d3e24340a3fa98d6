//! BlueSignal Broadcast
//!
//! A concurrent, multi-topic publish/subscribe hub. Each verification
//! pipeline run publishes its artifact; streaming clients subscribe and poll
//! their own bounded queue with a keepalive deadline.
//!
//! Producer/consumer contract: block the consumer, never the producer. A
//! slow subscriber drops messages alone, a disconnected subscriber is
//! unregistered promptly, and publishing to an empty topic retains nothing.

pub mod hub;
pub mod subscription;

pub use hub::{Broadcaster, DEFAULT_QUEUE_CAPACITY};
pub use subscription::{StreamEvent, Subscription};
