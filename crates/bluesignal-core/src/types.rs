//! Core types for BlueSignal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel label returned when a text classification call fails internally
pub const PIPELINE_ERROR_LABEL: &str = "Pipeline Error";

/// Geographic coordinates attached to a citizen report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A raw citizen-submitted incident report. Immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Submitting user
    pub user_id: String,

    /// Free-text description of the incident
    pub text: String,

    /// Optional reference to an uploaded image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,

    /// Optional location of the incident
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
}

impl Report {
    /// Create a new report submitted now
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            text: text.into(),
            image_ref: None,
            coordinates: None,
            submitted_at: Utc::now(),
        }
    }

    /// Attach an image reference
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Attach coordinates
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self
    }
}

/// Result of a single text classification call. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Winning label, drawn from the caller-supplied candidate set
    pub label: String,

    /// Confidence score in [0,1], rounded to 3 decimal places
    pub confidence: f64,
}

impl ClassificationResult {
    /// Create a result, clamping the confidence to [0,1] and rounding to 3 decimals
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence: round3(confidence.clamp(0.0, 1.0)),
        }
    }

    /// The sentinel result produced when the classifier backend fails
    pub fn pipeline_error() -> Self {
        Self {
            label: PIPELINE_ERROR_LABEL.to_string(),
            confidence: 0.0,
        }
    }

    /// Whether this result is the error sentinel
    pub fn is_error(&self) -> bool {
        self.label == PIPELINE_ERROR_LABEL
    }
}

/// Result of an image classification call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageClassificationResult {
    /// Normalized category name (mapped from the raw model label)
    pub category: String,

    /// Confidence score in [0,1], rounded to 3 decimal places
    pub confidence: f64,

    /// Raw label as returned by the underlying model, kept for audit
    pub raw_label: String,
}

impl ImageClassificationResult {
    /// Create a result, clamping the confidence to [0,1] and rounding to 3 decimals
    pub fn new(
        category: impl Into<String>,
        confidence: f64,
        raw_label: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            confidence: round3(confidence.clamp(0.0, 1.0)),
            raw_label: raw_label.into(),
        }
    }

    /// The sentinel result produced when the image classifier backend fails
    pub fn pipeline_error() -> Self {
        Self {
            category: PIPELINE_ERROR_LABEL.to_string(),
            confidence: 0.0,
            raw_label: "error".to_string(),
        }
    }

    /// Whether this result is the error sentinel
    pub fn is_error(&self) -> bool {
        self.category == PIPELINE_ERROR_LABEL
    }
}

/// Most recent record from the independent secondary feed about the same
/// timeframe. Older records in the feed are not considered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryReport {
    /// Record text
    pub text: String,

    /// Record date, as reported by the feed
    pub date: String,

    /// Number of media attachments on the record
    #[serde(default)]
    pub media_count: usize,
}

/// A report text together with its urgency and category classifications.
/// Intermediate form consumed by corroboration and summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedReport {
    pub text: String,
    pub urgency: ClassificationResult,
    pub category: ClassificationResult,
}

/// Verification status of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Pending,
}

impl VerificationStatus {
    /// Status derived from the corroboration outcome
    pub fn from_corroboration(corroborated: bool) -> Self {
        if corroborated {
            Self::Verified
        } else {
            Self::Pending
        }
    }
}

/// Output of the verification pipeline: the original report fields plus every
/// classification, the corroboration outcome, and the narrative summary.
/// Created exactly once per submitted report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedArtifact {
    /// Artifact identifier
    pub id: Uuid,

    /// Submitting user
    pub user_id: String,

    /// Original report text
    pub text: String,

    /// Original image reference, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,

    /// Original coordinates, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Original submission timestamp
    pub submitted_at: DateTime<Utc>,

    /// Urgency classification of the report text
    pub urgency: ClassificationResult,

    /// Incident sub-type classification of the report text
    pub category: ClassificationResult,

    /// Image classification, when an image was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageClassificationResult>,

    /// Whether the report was corroborated by the secondary source
    pub corroborated: bool,

    /// Narrative situation summary
    pub summary: String,

    /// Verification status derived from corroboration
    pub status: VerificationStatus,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_rounded_and_clamped() {
        let result = ClassificationResult::new("Urban Flooding", 0.123_456);
        assert_eq!(result.confidence, 0.123);

        let high = ClassificationResult::new("Urban Flooding", 1.7);
        assert_eq!(high.confidence, 1.0);

        let low = ClassificationResult::new("Urban Flooding", -0.4);
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn error_sentinels() {
        let text = ClassificationResult::pipeline_error();
        assert!(text.is_error());
        assert_eq!(text.confidence, 0.0);

        let image = ImageClassificationResult::pipeline_error();
        assert!(image.is_error());
        assert_eq!(image.raw_label, "error");
    }

    #[test]
    fn status_follows_corroboration() {
        assert_eq!(
            VerificationStatus::from_corroboration(true),
            VerificationStatus::Verified
        );
        assert_eq!(
            VerificationStatus::from_corroboration(false),
            VerificationStatus::Pending
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&VerificationStatus::Verified).unwrap();
        assert_eq!(json, "\"verified\"");
    }
}
