//! Cross-source corroboration
//!
//! Decides whether a citizen report and the most recent secondary-feed record
//! describe the same incident. The primary path asks a generative reasoning
//! backend and classifies its free-text answer; when no backend is configured
//! or the call fails, a deterministic keyword/category/urgency heuristic takes
//! over. A classifier failure while scoring the backend's answer is resolved
//! fail-closed: absence of evidence is not evidence of agreement.

use crate::backend::GenerativeBackend;
use bluesignal_classifiers::{is_high_urgency, ClassifierGateway, AGREEMENT_LABELS};
use bluesignal_core::ClassifiedReport;
use std::sync::Arc;
use tracing::{info, warn};

const FLOOD_KEYWORDS: [&str; 6] = [
    "flood",
    "flooding",
    "water",
    "inundation",
    "submerged",
    "overflow",
];

const STREET_KEYWORDS: [&str; 5] = ["street", "road", "sidewalk", "pavement", "highway"];

const BUILDING_KEYWORDS: [&str; 5] = ["building", "house", "shop", "office", "structure"];

/// Cross-source corroborator
#[derive(Clone)]
pub struct Corroborator {
    reasoning: Option<Arc<dyn GenerativeBackend>>,
    gateway: ClassifierGateway,
}

impl Corroborator {
    /// Create a corroborator. Without a reasoning backend every call takes the
    /// deterministic fallback path.
    pub fn new(reasoning: Option<Arc<dyn GenerativeBackend>>, gateway: ClassifierGateway) -> Self {
        Self { reasoning, gateway }
    }

    /// Decide whether the two classified reports describe the same incident
    pub async fn corroborate(&self, primary: &ClassifiedReport, secondary: &ClassifiedReport) -> bool {
        let Some(backend) = &self.reasoning else {
            return fallback_corroborate(primary, secondary);
        };

        let prompt = comparison_prompt(primary, secondary);
        let answer = match backend.generate(REASONING_SYSTEM_PROMPT, &prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(backend = backend.name(), "reasoning backend failed, using fallback: {e}");
                return fallback_corroborate(primary, secondary);
            }
        };

        // Score the free-text answer against the two-class agreement set.
        // A classifier failure here resolves to false, not to the fallback.
        let classification = self.gateway.classify(&answer, &AGREEMENT_LABELS).await;
        if classification.is_error() {
            warn!("agreement classification failed, treating as disagreement");
            return false;
        }

        info!(
            label = %classification.label,
            confidence = classification.confidence,
            "corroboration answer classified"
        );
        classification.label == AGREEMENT_LABELS[0]
    }
}

/// Deterministic fallback heuristic: (category match OR keyword match) AND
/// urgency match. Urgency compatibility is a hard requirement; a topically
/// identical but low-urgency secondary record does not corroborate.
pub fn fallback_corroborate(primary: &ClassifiedReport, secondary: &ClassifiedReport) -> bool {
    let primary_text = primary.text.to_lowercase();
    let secondary_text = secondary.text.to_lowercase();

    let keyword_match = both_mention(&primary_text, &secondary_text, &FLOOD_KEYWORDS)
        || both_mention(&primary_text, &secondary_text, &STREET_KEYWORDS)
        || both_mention(&primary_text, &secondary_text, &BUILDING_KEYWORDS);

    let urgency_match =
        is_high_urgency(&primary.urgency.label) && is_high_urgency(&secondary.urgency.label);

    let category_match = primary.category.label == secondary.category.label
        || categories_related(&primary.category.label, &secondary.category.label);

    let result = (category_match || keyword_match) && urgency_match;
    info!(
        category_match,
        keyword_match, urgency_match, result, "fallback corroboration"
    );
    result
}

fn both_mention(a: &str, b: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| a.contains(k)) && keywords.iter().any(|k| b.contains(k))
}

/// Fixed category adjacency table, queried in both directions because the
/// relation in the table is not guaranteed symmetric.
fn categories_related(a: &str, b: &str) -> bool {
    related_categories(a).contains(&b) || related_categories(b).contains(&a)
}

fn related_categories(category: &str) -> &'static [&'static str] {
    match category {
        "Urban Flooding" => &["Street Flooding", "Drainage Failure", "Heavy Rain Accumulation"],
        "Street Flooding" => &["Urban Flooding", "Drainage Failure", "Heavy Rain Accumulation"],
        "River Overflow" => &["Flash Flood", "Heavy Rain Accumulation"],
        "Flash Flood" => &["River Overflow", "Heavy Rain Accumulation"],
        _ => &[],
    }
}

const REASONING_SYSTEM_PROMPT: &str = "You compare two flood incident reports and state whether \
they describe the same event. Answer with a short judgement expressing agreement or disagreement.";

fn comparison_prompt(primary: &ClassifiedReport, secondary: &ClassifiedReport) -> String {
    format!(
        "Citizen Report: {}\n\
         Citizen Flood Classification: {} (confidence: {})\n\
         Citizen Urgency: {} (confidence: {})\n\
         \n\
         Secondary Report: {}\n\
         Secondary Flood Classification: {} (confidence: {})\n\
         Secondary Urgency: {} (confidence: {})\n\
         \n\
         Consider that both reports might be referring to the same flood event even if \
         classified differently. For example, urban flooding and street flooding can refer \
         to the same event.",
        primary.text,
        primary.category.label,
        primary.category.confidence,
        primary.urgency.label,
        primary.urgency.confidence,
        secondary.text,
        secondary.category.label,
        secondary.category.confidence,
        secondary.urgency.label,
        secondary.urgency.confidence,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bluesignal_classifiers::{RawPrediction, ZeroShot};
    use bluesignal_core::{ClassificationResult, Error, Result};

    fn classified(text: &str, urgency: &str, category: &str) -> ClassifiedReport {
        ClassifiedReport {
            text: text.to_string(),
            urgency: ClassificationResult::new(urgency, 0.9),
            category: ClassificationResult::new(category, 0.8),
        }
    }

    #[test]
    fn high_urgency_matching_categories_corroborate() {
        let primary = classified(
            "knee-deep water on Main Street, cars stuck",
            "Severe Flooding",
            "Urban Flooding",
        );
        let secondary = classified(
            "street flooding downtown",
            "Severe Flooding",
            "Urban Flooding",
        );
        assert!(fallback_corroborate(&primary, &secondary));
    }

    #[test]
    fn urgency_mismatch_blocks_corroboration() {
        // Topically identical, but the secondary record is low urgency
        let primary = classified(
            "knee-deep water on Main Street",
            "Severe Flooding",
            "Urban Flooding",
        );
        let secondary = classified(
            "some water pooling on the street",
            "Safe Normal",
            "Urban Flooding",
        );
        assert!(!fallback_corroborate(&primary, &secondary));
    }

    #[test]
    fn unrelated_low_urgency_record_does_not_corroborate() {
        let primary = classified(
            "knee-deep water on Main Street, cars stuck",
            "Severe Flooding",
            "Urban Flooding",
        );
        let secondary = classified(
            "heavy traffic congestion near the mall exit",
            "Safe Normal",
            "Other/Unknown Flood",
        );
        assert!(!fallback_corroborate(&primary, &secondary));
    }

    #[test]
    fn related_categories_count_as_a_match() {
        let primary = classified("basement pump failed", "Severe Flooding", "Urban Flooding");
        let secondary = classified(
            "blocked drains in the city centre",
            "Moderate Waterlogging",
            "Drainage Failure",
        );
        assert!(fallback_corroborate(&primary, &secondary));
    }

    #[test]
    fn keyword_overlap_rescues_category_mismatch() {
        let primary = classified(
            "river burst its banks, water in the park",
            "Severe Flooding",
            "River Overflow",
        );
        let secondary = classified(
            "office building ground floor under water",
            "Severe Flooding",
            "Sewer Backup",
        );
        // No category relation, but both mention flood-terms
        assert!(fallback_corroborate(&primary, &secondary));
    }

    #[test]
    fn adjacency_is_queried_both_directions() {
        assert!(categories_related("Drainage Failure", "Urban Flooding"));
        assert!(categories_related("Urban Flooding", "Drainage Failure"));
        assert!(!categories_related("Sewer Backup", "Coastal Storm Surge"));
    }

    /// Backend returning a fixed answer
    struct FixedAnswer(&'static str);

    #[async_trait]
    impl GenerativeBackend for FixedAnswer {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Zero-shot backend echoing whichever agreement label the text leans to
    struct AgreementClassifier;

    #[async_trait]
    impl ZeroShot for AgreementClassifier {
        async fn classify(&self, text: &str, labels: &[&str]) -> Result<RawPrediction> {
            let label = if text.to_lowercase().contains("same event") {
                labels[0]
            } else {
                labels[1]
            };
            Ok(RawPrediction::new(label, 0.9))
        }

        async fn classify_image(&self, _: &str, _: &[&str]) -> Result<RawPrediction> {
            Err(Error::classifier("not used"))
        }

        fn name(&self) -> &str {
            "agreement"
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl ZeroShot for FailingClassifier {
        async fn classify(&self, _: &str, _: &[&str]) -> Result<RawPrediction> {
            Err(Error::classifier("model unavailable"))
        }

        async fn classify_image(&self, _: &str, _: &[&str]) -> Result<RawPrediction> {
            Err(Error::classifier("model unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn reasoning_agreement_corroborates() {
        let gateway = ClassifierGateway::new(std::sync::Arc::new(AgreementClassifier));
        let corroborator = Corroborator::new(
            Some(Arc::new(FixedAnswer("These describe the same event."))),
            gateway,
        );

        let primary = classified("flooded street", "Severe Flooding", "Urban Flooding");
        let secondary = classified("water on the road", "Severe Flooding", "Urban Flooding");
        assert!(corroborator.corroborate(&primary, &secondary).await);
    }

    #[tokio::test]
    async fn classifier_failure_is_fail_closed() {
        let gateway = ClassifierGateway::new(std::sync::Arc::new(FailingClassifier));
        let corroborator = Corroborator::new(
            Some(Arc::new(FixedAnswer("These describe the same event."))),
            gateway,
        );

        let primary = classified("flooded street", "Severe Flooding", "Urban Flooding");
        let secondary = classified("water on the road", "Severe Flooding", "Urban Flooding");
        assert!(!corroborator.corroborate(&primary, &secondary).await);
    }

    /// Backend that always fails, forcing the fallback path
    struct DownBackend;

    #[async_trait]
    impl GenerativeBackend for DownBackend {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Err(Error::backend("service unavailable"))
        }

        fn name(&self) -> &str {
            "down"
        }
    }

    #[tokio::test]
    async fn backend_outage_falls_back_to_heuristic() {
        let gateway = ClassifierGateway::new(std::sync::Arc::new(FailingClassifier));
        let corroborator = Corroborator::new(Some(Arc::new(DownBackend)), gateway);

        let primary = classified(
            "knee-deep water on Main Street, cars stuck",
            "Severe Flooding",
            "Urban Flooding",
        );
        let secondary = classified(
            "street flooding downtown",
            "Severe Flooding",
            "Urban Flooding",
        );
        assert!(corroborator.corroborate(&primary, &secondary).await);
    }
}
