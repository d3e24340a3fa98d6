//! BlueSignal Classifiers
//!
//! The classifier gateway: an opaque capability boundary over zero-shot text
//! and image classification backends. The gateway never propagates a backend
//! failure to the caller; it degrades to sentinel results so report intake is
//! never blocked by a model outage.

pub mod classifier;
pub mod gateway;
pub mod hosted;
pub mod labels;

pub use classifier::{RawPrediction, ZeroShot};
pub use gateway::ClassifierGateway;
pub use hosted::HostedZeroShot;
pub use labels::{
    is_high_urgency, normalize_image_label, AGREEMENT_LABELS, CATEGORY_LABELS,
    HIGH_URGENCY_LABELS, IMAGE_LABELS, URGENCY_LABELS,
};
