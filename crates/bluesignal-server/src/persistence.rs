//! Persistence collaborator
//!
//! The pipeline hands reports and artifacts to this trait and reads topic
//! snapshots from it when seeding new stream subscribers. Its consistency is
//! the collaborator's concern. `InMemoryStore` backs tests and the demo
//! deployment.

use crate::topics;
use async_trait::async_trait;
use bluesignal_core::{Error, Report, Result, VerifiedArtifact};
use parking_lot::RwLock;
use uuid::Uuid;

/// Wire shape of one post record: the report fields plus its id. Used both
/// for the posts snapshot and for the live post payload, so subscribers see
/// one shape across the whole stream.
pub(crate) fn post_record(id: Uuid, report: &Report) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(report).map(|mut value| {
        if let Some(map) = value.as_object_mut() {
            map.insert("id".into(), serde_json::json!(id));
        }
        value
    })
}

/// Trait for the persistence collaborator
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Durably store a raw report, returning its id
    async fn persist_report(&self, report: &Report) -> Result<Uuid>;

    /// Durably store a verified artifact, returning its id
    async fn persist_artifact(&self, artifact: &VerifiedArtifact) -> Result<Uuid>;

    /// Ordered list of prior artifacts for a topic, used to seed subscribers
    async fn snapshot(&self, topic: &str) -> Result<Vec<serde_json::Value>>;
}

/// In-memory store
#[derive(Default)]
pub struct InMemoryStore {
    reports: RwLock<Vec<(Uuid, Report)>>,
    artifacts: RwLock<Vec<VerifiedArtifact>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored artifacts
    pub fn artifact_count(&self) -> usize {
        self.artifacts.read().len()
    }
}

#[async_trait]
impl Persistence for InMemoryStore {
    async fn persist_report(&self, report: &Report) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.reports.write().push((id, report.clone()));
        Ok(id)
    }

    async fn persist_artifact(&self, artifact: &VerifiedArtifact) -> Result<Uuid> {
        self.artifacts.write().push(artifact.clone());
        Ok(artifact.id)
    }

    async fn snapshot(&self, topic: &str) -> Result<Vec<serde_json::Value>> {
        match topic {
            topics::HOTSPOTS => {
                let artifacts = self.artifacts.read();
                artifacts
                    .iter()
                    .map(|a| serde_json::to_value(a).map_err(Error::from))
                    .collect()
            }
            topics::POSTS => {
                let reports = self.reports.read();
                reports
                    .iter()
                    .map(|(id, r)| post_record(*id, r).map_err(Error::from))
                    .collect()
            }
            other => Err(Error::persistence(format!("unknown topic: {other}"))),
        }
    }
}
