//! BlueSignal Pipeline
//!
//! The report verification pipeline: cross-source corroboration, narrative
//! summarization, and the orchestrator that turns a raw citizen report into a
//! verified artifact.
//!
//! Failure semantics: every stage absorbs its own failures. The classifier
//! gateway degrades to sentinel labels, the summarizer falls back to a fixed
//! message, and corroboration resolves fail-closed; the orchestrator itself
//! has no failure branch.

pub mod backend;
pub mod corroborate;
pub mod summarize;
pub mod verify;

pub use backend::{GeminiBackend, GenerativeBackend, OpenAiChatBackend};
pub use corroborate::{fallback_corroborate, Corroborator};
pub use summarize::{Summarizer, SUMMARY_UNAVAILABLE};
pub use verify::{VerificationPipeline, VerificationPolicy};
