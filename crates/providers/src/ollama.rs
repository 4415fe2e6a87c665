//! Ollama provider speaking the native `/api/chat` protocol.
//!
//! Ollama needs no credential. Sampling parameters travel in an `options`
//! object (`num_predict` is Ollama's name for the output-length limit) and
//! the reply comes back as a single `message` object.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use sves_config::BackendConfig;
use sves_core::backend::BackendKind;
use sves_core::error::ProviderError;
use sves_core::message::{Message, assemble_turns};
use tracing::debug;

use crate::http::{self, ApiMessage};

pub const CHAT_PATH: &str = "/api/chat";
pub const HEALTH_PATH: &str = "/api/tags";

/// Adapter for a local Ollama server.
pub struct OllamaProvider {
    config: BackendConfig,
    completion_url: String,
    health_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            completion_url: http::join(&config.base_url, CHAT_PATH),
            health_url: http::join(&config.base_url, HEALTH_PATH),
            config,
            client: reqwest::Client::new(),
        }
    }

    fn request_body(&self, messages: &[Message]) -> serde_json::Value {
        json!({
            "model": self.config.model,
            "messages": http::to_api_messages(messages),
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "num_predict": self.config.max_tokens,
            },
        })
    }
}

#[async_trait]
impl sves_core::Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn kind(&self) -> BackendKind {
        self.config.kind
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn completion_url(&self) -> &str {
        &self.completion_url
    }

    fn health_url(&self) -> &str {
        &self.health_url
    }

    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        history: &[Message],
    ) -> Result<String, ProviderError> {
        let messages = assemble_turns(system_prompt, history, prompt);
        let body = self.request_body(&messages);

        debug!(
            provider = "ollama",
            model = %self.config.model,
            turns = messages.len(),
            "Sending chat request"
        );

        let response: ChatResponse = http::post_json(
            self.client.post(&self.completion_url),
            &self.completion_url,
            self.config.timeout(),
            &body,
        )
        .await?;

        response
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| ProviderError::InvalidResponse("No message in response".into()))
    }

    async fn health_check(&self) -> bool {
        http::probe(
            self.client.get(&self.health_url),
            &self.health_url,
            |status| status.is_success(),
        )
        .await
    }
}

// --- Ollama API types (internal) ---

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ApiMessage>,
}
