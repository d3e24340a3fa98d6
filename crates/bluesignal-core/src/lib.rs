//! BlueSignal Core
//!
//! Shared types and error handling for the BlueSignal report verification and
//! real-time distribution pipeline.
//!
//! This crate provides:
//! - Wire types for reports, classifications, and verified artifacts
//! - The crate-wide error type and result alias

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ClassificationResult, ClassifiedReport, Coordinates, ImageClassificationResult, Report,
    SecondaryReport, VerificationStatus, VerifiedArtifact, PIPELINE_ERROR_LABEL,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ClassificationResult, ClassifiedReport, Coordinates, ImageClassificationResult, Report,
        SecondaryReport, VerificationStatus, VerifiedArtifact,
    };
}
