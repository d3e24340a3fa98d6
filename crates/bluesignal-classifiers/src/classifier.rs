//! Zero-shot classifier trait and raw prediction type

use async_trait::async_trait;
use bluesignal_core::Result;

/// Raw prediction from a zero-shot model: the winning candidate label and its
/// score, before any gateway normalization.
#[derive(Debug, Clone)]
pub struct RawPrediction {
    /// Winning label from the supplied candidate set
    pub label: String,

    /// Model score for that label
    pub score: f64,
}

impl RawPrediction {
    /// Create a new raw prediction
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Trait for zero-shot classification backends.
///
/// Implementations may fail; the gateway is responsible for absorbing errors
/// into sentinel results so callers never see them.
#[async_trait]
pub trait ZeroShot: Send + Sync {
    /// Classify text against an ordered candidate-label set
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<RawPrediction>;

    /// Classify an image reference against an ordered candidate-label set
    async fn classify_image(&self, image_ref: &str, labels: &[&str]) -> Result<RawPrediction>;

    /// Get the backend name
    fn name(&self) -> &str;
}
