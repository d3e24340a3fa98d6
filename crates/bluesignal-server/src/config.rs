//! Server configuration

use crate::auth::{Role, StaticTokenAuth};
use crate::persistence::InMemoryStore;
use crate::state::AppState;
use bluesignal_broadcast::Broadcaster;
use bluesignal_classifiers::{ClassifierGateway, HostedZeroShot};
use bluesignal_pipeline::{
    Corroborator, GeminiBackend, GenerativeBackend, OpenAiChatBackend, Summarizer,
    VerificationPipeline, VerificationPolicy,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Hosted zero-shot classification endpoint
    pub classifier: ClassifierConfig,

    /// Generative backends for summarization, tried in order
    #[serde(default)]
    pub summarizer_backends: Vec<BackendConfig>,

    /// Optional generative backend for corroboration reasoning
    #[serde(default)]
    pub reasoning_backend: Option<BackendConfig>,

    /// Corroboration outcome applied when no secondary source is supplied
    #[serde(default = "default_true")]
    pub verify_without_secondary: bool,

    /// Idle seconds before a keepalive record is emitted on a stream
    #[serde(default = "default_keepalive_secs")]
    pub keepalive_secs: u64,

    /// Per-subscriber queue capacity in the broadcaster
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Static token table backing the auth collaborator
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

/// Hosted zero-shot classifier endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub base_url: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_image_model")]
    pub image_model: String,

    #[serde(default)]
    pub api_key: Option<String>,
}

/// One generative backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Wire format of the provider
    pub provider: ProviderKind,

    /// Display name used in logs (defaults to the provider kind)
    #[serde(default)]
    pub name: Option<String>,

    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions (Groq and similar)
    Openai,
    Gemini,
}

/// One static token entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: String,
    pub role: Role,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::cli::Cli) -> anyhow::Result<Self> {
        let mut config: Self = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            anyhow::bail!("configuration file not found: {config_path}");
        };

        if let Some(bind) = &cli.bind {
            config.bind = bind.clone();
        }

        Ok(config)
    }

    /// Assemble the application state from this configuration
    pub fn build_state(&self) -> AppState {
        let backend = Arc::new(HostedZeroShot::new(
            &self.classifier.base_url,
            &self.classifier.text_model,
            &self.classifier.image_model,
            self.classifier.api_key.clone(),
        ));
        let gateway = ClassifierGateway::new(backend);

        let summarizer_backends = self
            .summarizer_backends
            .iter()
            .map(build_backend)
            .collect();
        let summarizer = Summarizer::new(summarizer_backends);

        let reasoning = self.reasoning_backend.as_ref().map(build_backend);
        let corroborator = Corroborator::new(reasoning, gateway.clone());

        let pipeline = VerificationPipeline::new(
            gateway.clone(),
            corroborator,
            summarizer,
            VerificationPolicy {
                verify_without_secondary: self.verify_without_secondary,
            },
        );

        let mut auth = StaticTokenAuth::new();
        for entry in &self.tokens {
            auth = auth.with_token(&entry.token, &entry.user_id, entry.role);
        }

        AppState {
            gateway,
            pipeline: Arc::new(pipeline),
            hub: Broadcaster::with_capacity(self.queue_capacity),
            store: Arc::new(InMemoryStore::new()),
            auth: Arc::new(auth),
            keepalive: Duration::from_secs(self.keepalive_secs),
        }
    }
}

fn build_backend(config: &BackendConfig) -> Arc<dyn GenerativeBackend> {
    match config.provider {
        ProviderKind::Openai => Arc::new(OpenAiChatBackend::new(
            config.name.clone().unwrap_or_else(|| "openai".to_string()),
            &config.base_url,
            &config.model,
            &config.api_key,
        )),
        ProviderKind::Gemini => Arc::new(GeminiBackend::new(
            &config.base_url,
            &config.model,
            &config.api_key,
        )),
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_text_model() -> String {
    "typeform/distilbert-base-uncased-mnli".to_string()
}

fn default_image_model() -> String {
    "openai/clip-vit-base-patch32".to_string()
}

fn default_keepalive_secs() -> u64 {
    25
}

fn default_queue_capacity() -> usize {
    bluesignal_broadcast::DEFAULT_QUEUE_CAPACITY
}

fn default_true() -> bool {
    true
}
