//! Verification pipeline orchestrator
//!
//! One call per submitted report: classify, corroborate, summarize, assemble.
//! Each stage absorbs its own failures (sentinel labels, fail-closed
//! corroboration, sentinel summary), so the orchestrator always completes and
//! returns an artifact. The pipeline holds no state between calls.

use crate::corroborate::Corroborator;
use crate::summarize::Summarizer;
use bluesignal_classifiers::ClassifierGateway;
use bluesignal_core::{
    ClassifiedReport, Report, SecondaryReport, VerificationStatus, VerifiedArtifact,
};
use tracing::info;
use uuid::Uuid;

/// Corroboration policy applied when no secondary source is supplied
#[derive(Debug, Clone, Copy)]
pub struct VerificationPolicy {
    /// Treat a report without a corroborating source as verified
    pub verify_without_secondary: bool,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        // Matches the observed production behavior: submissions are
        // optimistically verified absent a corroborating source.
        Self {
            verify_without_secondary: true,
        }
    }
}

/// End-to-end verification pipeline
#[derive(Clone)]
pub struct VerificationPipeline {
    gateway: ClassifierGateway,
    corroborator: Corroborator,
    summarizer: Summarizer,
    policy: VerificationPolicy,
}

impl VerificationPipeline {
    /// Create a pipeline from its stages
    pub fn new(
        gateway: ClassifierGateway,
        corroborator: Corroborator,
        summarizer: Summarizer,
        policy: VerificationPolicy,
    ) -> Self {
        Self {
            gateway,
            corroborator,
            summarizer,
            policy,
        }
    }

    /// Transform a raw report into a verified artifact.
    ///
    /// Text classification and image classification have no data dependency
    /// and run concurrently; corroboration and summarization depend on the
    /// text classifications and follow them.
    pub async fn process(
        &self,
        report: &Report,
        secondary: Option<&SecondaryReport>,
    ) -> VerifiedArtifact {
        let (urgency, category, image) = tokio::join!(
            self.gateway.classify_urgency(&report.text),
            self.gateway.classify_category(&report.text),
            async {
                match &report.image_ref {
                    Some(image_ref) => Some(self.gateway.classify_image(image_ref).await),
                    None => None,
                }
            },
        );

        let classified = ClassifiedReport {
            text: report.text.clone(),
            urgency,
            category,
        };

        let corroborated = match secondary {
            Some(secondary) => {
                let (urgency, category) = tokio::join!(
                    self.gateway.classify_urgency(&secondary.text),
                    self.gateway.classify_category(&secondary.text),
                );
                let secondary_classified = ClassifiedReport {
                    text: secondary.text.clone(),
                    urgency,
                    category,
                };
                self.corroborator
                    .corroborate(&classified, &secondary_classified)
                    .await
            }
            None => self.policy.verify_without_secondary,
        };

        let location = report
            .coordinates
            .map(|c| format!("{:.5}, {:.5}", c.latitude, c.longitude));
        let summary = self
            .summarizer
            .summarize(&classified, location.as_deref())
            .await;

        let status = VerificationStatus::from_corroboration(corroborated);
        info!(
            urgency = %classified.urgency.label,
            category = %classified.category.label,
            corroborated,
            ?status,
            "report processed"
        );

        VerifiedArtifact {
            id: Uuid::new_v4(),
            user_id: report.user_id.clone(),
            text: report.text.clone(),
            image_ref: report.image_ref.clone(),
            coordinates: report.coordinates,
            submitted_at: report.submitted_at,
            urgency: classified.urgency,
            category: classified.category,
            image,
            corroborated,
            summary,
            status,
        }
    }
}
