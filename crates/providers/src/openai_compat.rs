//! OpenAI-compatible provider implementation.
//!
//! Works with: vLLM, LM Studio, and any custom endpoint exposing
//! `/v1/chat/completions`. The kinds differ only in their readiness path and
//! in whether a bearer token is sent:
//!
//! | Kind | Readiness | Bearer token |
//! |------|-----------|--------------|
//! | vllm | `/health` | when configured |
//! | custom_api | `/health` | when configured |
//! | lm_studio | `/v1/models` | never |

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use sves_config::BackendConfig;
use sves_core::backend::BackendKind;
use sves_core::error::ProviderError;
use sves_core::message::{Message, assemble_turns};
use tracing::debug;

use crate::http::{self, ApiMessage};

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const HEALTH_PATH: &str = "/health";
pub const MODELS_PATH: &str = "/v1/models";

/// An OpenAI-compatible LLM provider.
pub struct OpenAiCompatProvider {
    name: &'static str,
    config: BackendConfig,
    completion_url: String,
    health_url: String,
    send_api_key: bool,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a provider using the conventions of `config.kind`.
    pub fn new(config: BackendConfig) -> Self {
        match config.kind {
            BackendKind::LmStudio => Self::lm_studio(config),
            BackendKind::CustomApi => Self::with_profile(config, "custom_api", HEALTH_PATH, true),
            _ => Self::vllm(config),
        }
    }

    /// vLLM's OpenAI-compatible server (convenience constructor).
    pub fn vllm(config: BackendConfig) -> Self {
        Self::with_profile(config, "vllm", HEALTH_PATH, true)
    }

    /// LM Studio's local server (convenience constructor).
    pub fn lm_studio(config: BackendConfig) -> Self {
        Self::with_profile(config, "lm_studio", MODELS_PATH, false)
    }

    fn with_profile(
        config: BackendConfig,
        name: &'static str,
        health_path: &str,
        send_api_key: bool,
    ) -> Self {
        Self {
            name,
            completion_url: http::join(&config.base_url, CHAT_COMPLETIONS_PATH),
            health_url: http::join(&config.base_url, health_path),
            config,
            send_api_key,
            client: reqwest::Client::new(),
        }
    }

    fn bearer(&self) -> Option<String> {
        self.config
            .api_key()
            .filter(|_| self.send_api_key)
            .map(|key| format!("Bearer {key}"))
    }
}

#[async_trait]
impl sves_core::Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        self.name
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
        let body = json!({
            "model": self.config.model,
            "messages": http::to_api_messages(&messages),
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        debug!(
            provider = %self.name,
            model = %self.config.model,
            turns = messages.len(),
            "Sending completion request"
        );

        let mut request = self.client.post(&self.completion_url);
        if let Some(bearer) = self.bearer() {
            request = request.header("Authorization", bearer);
        }

        let response: ChatCompletion =
            http::post_json(request, &self.completion_url, self.config.timeout(), &body).await?;
        first_choice_text(response)
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

// --- OpenAI API types (internal) ---

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

/// Pull `choices[0].message.content` out of a chat-completion envelope.
pub(crate) fn first_choice_text(response: ChatCompletion) -> Result<String, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".into()))?;

    choice
        .message
        .content
        .ok_or_else(|| ProviderError::InvalidResponse("Choice has no message content".into()))
}
