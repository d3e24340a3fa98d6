//! Shared application state

use crate::auth::AuthService;
use crate::persistence::Persistence;
use bluesignal_broadcast::Broadcaster;
use bluesignal_classifiers::ClassifierGateway;
use bluesignal_pipeline::VerificationPipeline;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Topic names published by the pipeline
pub mod topics {
    /// Verified artifacts for the authority dashboard map
    pub const HOTSPOTS: &str = "hotspots";

    /// Newly created citizen posts
    pub const POSTS: &str = "posts";
}

/// Tagged record emitted over the streaming transport
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Envelope {
    /// Initial bulk payload sent once per connection
    Snapshot(Vec<serde_json::Value>),

    /// A newly verified artifact
    Hotspot(serde_json::Value),

    /// A newly created post
    Post(serde_json::Value),

    /// Periodic no-op, distinguishable from real payloads by the type tag
    Keepalive,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Classifier gateway, exposed for the single-shot classify routes
    pub gateway: ClassifierGateway,

    /// End-to-end verification pipeline
    pub pipeline: Arc<VerificationPipeline>,

    /// Multi-topic hub fanning artifacts out to stream subscribers
    pub hub: Broadcaster<Envelope>,

    /// Persistence collaborator
    pub store: Arc<dyn Persistence>,

    /// Authentication collaborator
    pub auth: Arc<dyn AuthService>,

    /// Idle window after which a keepalive record is emitted
    pub keepalive: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wire_format_is_tagged() {
        let keepalive = serde_json::to_value(Envelope::Keepalive).unwrap();
        assert_eq!(keepalive, serde_json::json!({ "type": "keepalive" }));

        let hotspot = serde_json::to_value(Envelope::Hotspot(serde_json::json!({ "id": 1 })))
            .unwrap();
        assert_eq!(
            hotspot,
            serde_json::json!({ "type": "hotspot", "data": { "id": 1 } })
        );

        let snapshot = serde_json::to_value(Envelope::Snapshot(vec![])).unwrap();
        assert_eq!(snapshot, serde_json::json!({ "type": "snapshot", "data": [] }));
    }
}
