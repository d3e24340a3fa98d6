//! Classifier gateway with the never-fail contract
//!
//! The gateway wraps a zero-shot backend and absorbs every backend failure
//! into a sentinel result: label "Pipeline Error" (image: category
//! "Pipeline Error", raw label "error") with confidence 0.0. A classification
//! outage degrades the artifact instead of aborting report intake.

use crate::classifier::ZeroShot;
use crate::labels::{self, CATEGORY_LABELS, IMAGE_LABELS, URGENCY_LABELS};
use bluesignal_core::{ClassificationResult, ImageClassificationResult};
use std::sync::Arc;
use tracing::error;

/// Gateway over a zero-shot classification backend
#[derive(Clone)]
pub struct ClassifierGateway {
    backend: Arc<dyn ZeroShot>,
}

impl ClassifierGateway {
    /// Create a gateway over the given backend
    pub fn new(backend: Arc<dyn ZeroShot>) -> Self {
        Self { backend }
    }

    /// Classify text against an arbitrary candidate set. Never fails.
    pub async fn classify(&self, text: &str, candidate_labels: &[&str]) -> ClassificationResult {
        match self.backend.classify(text, candidate_labels).await {
            Ok(prediction) => ClassificationResult::new(prediction.label, prediction.score),
            Err(e) => {
                error!(backend = self.backend.name(), "text classification failed: {e}");
                ClassificationResult::pipeline_error()
            }
        }
    }

    /// Classify report text for urgency
    pub async fn classify_urgency(&self, text: &str) -> ClassificationResult {
        self.classify(text, &URGENCY_LABELS).await
    }

    /// Classify report text for incident sub-type
    pub async fn classify_category(&self, text: &str) -> ClassificationResult {
        self.classify(text, &CATEGORY_LABELS).await
    }

    /// Classify an image reference against the fixed image label set, mapping
    /// the raw model label to its normalized category. Never fails.
    pub async fn classify_image(&self, image_ref: &str) -> ImageClassificationResult {
        match self.backend.classify_image(image_ref, &IMAGE_LABELS).await {
            Ok(prediction) => ImageClassificationResult::new(
                labels::normalize_image_label(&prediction.label),
                prediction.score,
                prediction.label,
            ),
            Err(e) => {
                error!(backend = self.backend.name(), "image classification failed: {e}");
                ImageClassificationResult::pipeline_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RawPrediction;
    use async_trait::async_trait;
    use bluesignal_core::{Error, Result};

    /// Backend that always returns the first candidate label
    struct FirstLabelBackend;

    #[async_trait]
    impl ZeroShot for FirstLabelBackend {
        async fn classify(&self, _text: &str, labels: &[&str]) -> Result<RawPrediction> {
            Ok(RawPrediction::new(labels[0], 0.987_654))
        }

        async fn classify_image(&self, _image_ref: &str, labels: &[&str]) -> Result<RawPrediction> {
            Ok(RawPrediction::new(labels[0], 0.6))
        }

        fn name(&self) -> &str {
            "first-label"
        }
    }

    /// Backend that fails every call
    struct FailingBackend;

    #[async_trait]
    impl ZeroShot for FailingBackend {
        async fn classify(&self, _text: &str, _labels: &[&str]) -> Result<RawPrediction> {
            Err(Error::classifier("model unavailable"))
        }

        async fn classify_image(
            &self,
            _image_ref: &str,
            _labels: &[&str],
        ) -> Result<RawPrediction> {
            Err(Error::classifier("model unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn label_comes_from_candidate_set() {
        let gateway = ClassifierGateway::new(Arc::new(FirstLabelBackend));
        let result = gateway.classify_urgency("knee-deep water on Main Street").await;
        assert!(URGENCY_LABELS.contains(&result.label.as_str()));
        assert_eq!(result.confidence, 0.988);
    }

    #[tokio::test]
    async fn backend_failure_yields_sentinel() {
        let gateway = ClassifierGateway::new(Arc::new(FailingBackend));

        let text = gateway.classify_category("water everywhere").await;
        assert!(text.is_error());
        assert_eq!(text.confidence, 0.0);

        let image = gateway.classify_image("uploads/img.jpg").await;
        assert!(image.is_error());
        assert_eq!(image.confidence, 0.0);
    }

    #[tokio::test]
    async fn image_label_is_normalized() {
        let gateway = ClassifierGateway::new(Arc::new(FirstLabelBackend));
        let result = gateway.classify_image("uploads/img.jpg").await;
        assert_eq!(result.category, "Urban Flooding (Severe, Stagnant)");
        assert_eq!(result.raw_label, IMAGE_LABELS[0]);
    }
}
