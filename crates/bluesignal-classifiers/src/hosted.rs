//! Hosted zero-shot inference client
//!
//! Talks to a hosted inference endpoint exposing zero-shot text and image
//! classification in the common format:
//! ```text
//! POST {base_url}/models/{model}
//! {"inputs": "...", "parameters": {"candidate_labels": ["a", "b"]}}
//! ```
//! Text responses carry parallel `labels`/`scores` arrays ordered by score;
//! image responses carry a `[{"label", "score"}, ...]` list.

use crate::classifier::{RawPrediction, ZeroShot};
use async_trait::async_trait;
use bluesignal_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Hosted zero-shot classifier backend
#[derive(Debug, Clone)]
pub struct HostedZeroShot {
    client: reqwest::Client,
    base_url: String,
    text_model: String,
    image_model: String,
    api_key: Option<String>,
}

impl HostedZeroShot {
    /// Create a new client for a hosted inference endpoint
    pub fn new(
        base_url: impl Into<String>,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            text_model: text_model.into(),
            image_model: image_model.into(),
            api_key,
        }
    }

    async fn post(&self, model: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let url = format!("{}/models/{}", self.base_url, model);
        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::classifier(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::classifier(format!(
                "inference endpoint returned {status}: {text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::classifier(format!("invalid inference response: {e}")))
    }

    fn parse_text_response(value: serde_json::Value) -> Result<RawPrediction> {
        let parsed: TextResponse = serde_json::from_value(value)
            .map_err(|e| Error::classifier(format!("malformed text response: {e}")))?;

        match (parsed.labels.first(), parsed.scores.first()) {
            (Some(label), Some(score)) => Ok(RawPrediction::new(label.clone(), *score)),
            _ => Err(Error::classifier("text response carried no predictions")),
        }
    }

    fn parse_image_response(value: serde_json::Value) -> Result<RawPrediction> {
        let parsed: Vec<ImagePrediction> = serde_json::from_value(value)
            .map_err(|e| Error::classifier(format!("malformed image response: {e}")))?;

        parsed
            .into_iter()
            .next()
            .map(|p| RawPrediction::new(p.label, p.score))
            .ok_or_else(|| Error::classifier("image response carried no predictions"))
    }
}

#[async_trait]
impl ZeroShot for HostedZeroShot {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<RawPrediction> {
        let body = serde_json::json!({
            "inputs": text,
            "parameters": { "candidate_labels": labels },
        });

        let value = self.post(&self.text_model, body).await?;
        Self::parse_text_response(value)
    }

    async fn classify_image(&self, image_ref: &str, labels: &[&str]) -> Result<RawPrediction> {
        let body = serde_json::json!({
            "inputs": { "image": image_ref },
            "parameters": { "candidate_labels": labels },
        });

        let value = self.post(&self.image_model, body).await?;
        Self::parse_image_response(value)
    }

    fn name(&self) -> &str {
        "hosted-zero-shot"
    }
}

#[derive(Debug, Deserialize)]
struct TextResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ImagePrediction {
    label: String,
    score: f64,
}
