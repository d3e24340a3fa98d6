//! Generative backend trait and HTTP clients
//!
//! Two wire formats are supported: OpenAI-compatible chat completions (used by
//! Groq and similar providers) and the Gemini generateContent API.

use async_trait::async_trait;
use bluesignal_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout for generative calls
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Sampling temperature for summaries and corroboration reasoning
const TEMPERATURE: f64 = 0.2;

/// Completion cap, sized for a ≤90-word summary
const MAX_TOKENS: u32 = 180;

/// Trait for generative reasoning/summarization backends
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Generate a completion for the given system and user prompts
    async fn generate(&self, system: &str, user: &str) -> Result<String>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// OpenAI-compatible chat completions backend
#[derive(Debug, Clone)]
pub struct OpenAiChatBackend {
    client: reqwest::Client,
    name: String,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiChatBackend {
    /// Create a backend for any OpenAI-compatible provider
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn parse_response(value: serde_json::Value) -> Result<String> {
        let parsed: ChatResponse = serde_json::from_value(value)
            .map_err(|e| Error::backend(format!("malformed chat response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .map(|content| content.trim().to_string())
            .ok_or_else(|| Error::backend("chat response carried no content"))
    }
}

#[async_trait]
impl GenerativeBackend for OpenAiChatBackend {
    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::backend(format!("{} request failed: {e}", self.name)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::backend(format!(
                "{} returned {status}: {text}",
                self.name
            )));
        }

        let value = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("invalid {} response: {e}", self.name)))?;

        Self::parse_response(value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Gemini generateContent backend
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    /// Create a backend for the Gemini API
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn parse_response(value: serde_json::Value) -> Result<String> {
        let parsed: GeminiResponse = serde_json::from_value(value)
            .map_err(|e| Error::backend(format!("malformed gemini response: {e}")))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            Err(Error::backend("gemini response carried no text"))
        } else {
            Ok(trimmed.to_string())
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = serde_json::json!({
            "systemInstruction": { "parts": [ { "text": system } ] },
            "contents": [ { "role": "user", "parts": [ { "text": user } ] } ],
            "generationConfig": { "temperature": TEMPERATURE, "maxOutputTokens": MAX_TOKENS },
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::backend(format!("gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::backend(format!("gemini returned {status}: {text}")));
        }

        let value = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("invalid gemini response: {e}")))?;

        Self::parse_response(value)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// =============================================================================
// Response structures
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chat_response() {
        let value = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  Severe flooding reported. " } }
            ]
        });

        let content = OpenAiChatBackend::parse_response(value).unwrap();
        assert_eq!(content, "Severe flooding reported.");
    }

    #[test]
    fn empty_chat_content_is_an_error() {
        let value = serde_json::json!({
            "choices": [ { "message": { "role": "assistant", "content": "   " } } ]
        });
        assert!(OpenAiChatBackend::parse_response(value).is_err());
    }

    #[test]
    fn parses_gemini_response() {
        let value = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Situation: " }, { "text": "flooding." } ] } }
            ]
        });

        let content = GeminiBackend::parse_response(value).unwrap();
        assert_eq!(content, "Situation: flooding.");
    }

    #[test]
    fn gemini_without_candidates_is_an_error() {
        let value = serde_json::json!({ "candidates": [] });
        assert!(GeminiBackend::parse_response(value).is_err());
    }
}
