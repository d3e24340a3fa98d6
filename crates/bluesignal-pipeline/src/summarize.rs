//! Narrative summarization with ordered backend fallback
//!
//! Tries each configured generative backend in order, first usable answer
//! wins. Every attempt runs under its own timeout and is logged on failure.
//! Total failure (or zero configured backends) yields a fixed sentinel
//! message; the summarizer never raises.

use crate::backend::GenerativeBackend;
use bluesignal_core::ClassifiedReport;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Fixed message returned when every backend fails or none are configured
pub const SUMMARY_UNAVAILABLE: &str = "AI summary generation unavailable.";

/// Default per-attempt timeout
const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(20);

const SYSTEM_PROMPT: &str = "You are a disaster response analyst. Write a concise (<=90 words), \
professional flood situation summary with: 1) Situation & severity, 2) Likely impact, \
3) Immediate recommended actions. Avoid fluff, no emojis.";

/// Narrative summarizer over an ordered list of generative backends
#[derive(Clone)]
pub struct Summarizer {
    backends: Vec<Arc<dyn GenerativeBackend>>,
    attempt_timeout: Duration,
}

impl Summarizer {
    /// Create a summarizer over the given backends, tried in order
    pub fn new(backends: Vec<Arc<dyn GenerativeBackend>>) -> Self {
        Self {
            backends,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Override the per-attempt timeout
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Produce a situation summary. Always returns a non-empty string.
    pub async fn summarize(&self, report: &ClassifiedReport, location: Option<&str>) -> String {
        let prompt = user_prompt(report, location);

        for backend in &self.backends {
            match timeout(self.attempt_timeout, backend.generate(SYSTEM_PROMPT, &prompt)).await {
                Ok(Ok(content)) if !content.trim().is_empty() => {
                    info!(backend = backend.name(), "summary generated");
                    return content.trim().to_string();
                }
                Ok(Ok(_)) => {
                    warn!(backend = backend.name(), "summary response empty, trying next");
                }
                Ok(Err(e)) => {
                    warn!(backend = backend.name(), "summary attempt failed: {e}");
                }
                Err(_) => {
                    warn!(backend = backend.name(), "summary attempt timed out");
                }
            }
        }

        SUMMARY_UNAVAILABLE.to_string()
    }
}

fn user_prompt(report: &ClassifiedReport, location: Option<&str>) -> String {
    format!(
        "Citizen text: {}\nUrgency: {}\nHazard: {}\nLocation: {}\nSummarize clearly for decision-makers.",
        report.text,
        report.urgency.label,
        report.category.label,
        location.unwrap_or("Unknown"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bluesignal_core::{ClassificationResult, Error, Result};

    fn classified() -> ClassifiedReport {
        ClassifiedReport {
            text: "knee-deep water on Main Street".to_string(),
            urgency: ClassificationResult::new("Severe Flooding", 0.91),
            category: ClassificationResult::new("Urban Flooding", 0.84),
        }
    }

    struct Fixed(&'static str);

    #[async_trait]
    impl GenerativeBackend for Fixed {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct Failing;

    #[async_trait]
    impl GenerativeBackend for Failing {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Err(Error::backend("service unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Hanging;

    #[async_trait]
    impl GenerativeBackend for Hanging {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }

        fn name(&self) -> &str {
            "hanging"
        }
    }

    #[tokio::test]
    async fn first_usable_backend_wins() {
        let summarizer = Summarizer::new(vec![
            Arc::new(Failing),
            Arc::new(Fixed("Severe urban flooding on Main Street.")),
            Arc::new(Fixed("should not be reached")),
        ]);

        let summary = summarizer.summarize(&classified(), Some("Main Street")).await;
        assert_eq!(summary, "Severe urban flooding on Main Street.");
    }

    #[tokio::test]
    async fn empty_content_moves_to_next_backend() {
        let summarizer = Summarizer::new(vec![
            Arc::new(Fixed("   ")),
            Arc::new(Fixed("Moderate waterlogging near the station.")),
        ]);

        let summary = summarizer.summarize(&classified(), None).await;
        assert_eq!(summary, "Moderate waterlogging near the station.");
    }

    #[tokio::test]
    async fn total_failure_yields_sentinel() {
        let summarizer = Summarizer::new(vec![Arc::new(Failing), Arc::new(Failing)]);
        let summary = summarizer.summarize(&classified(), None).await;
        assert_eq!(summary, SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn no_backends_yields_sentinel() {
        let summarizer = Summarizer::new(Vec::new());
        let summary = summarizer.summarize(&classified(), None).await;
        assert_eq!(summary, SUMMARY_UNAVAILABLE);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_backend_times_out_and_falls_through() {
        let summarizer = Summarizer::new(vec![
            Arc::new(Hanging),
            Arc::new(Fixed("Flash flood receding.")),
        ])
        .with_attempt_timeout(Duration::from_secs(5));

        let summary = summarizer.summarize(&classified(), None).await;
        assert_eq!(summary, "Flash flood receding.");
    }
}
