//! Azure OpenAI (government cloud) provider.
//!
//! Deployment-scoped URLs, a mandatory `api-key` header, and the standard
//! chat-completions envelope. The model identifier is the deployment name,
//! so it is part of the path rather than the body.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use sves_config::BackendConfig;
use sves_core::backend::BackendKind;
use sves_core::error::ProviderError;
use sves_core::message::{Message, assemble_turns};
use tracing::debug;

use crate::http;
use crate::openai_compat::{ChatCompletion, first_choice_text};

pub const API_VERSION: &str = "2024-02-15-preview";
const API_KEY_HEADER: &str = "api-key";

/// Adapter for an Azure Government OpenAI deployment.
pub struct AzureGovProvider {
    config: BackendConfig,
    completion_url: String,
    health_url: String,
    client: reqwest::Client,
}

impl AzureGovProvider {
    pub fn new(config: BackendConfig) -> Self {
        let completion_url = http::join(
            &config.base_url,
            &format!(
                "/openai/deployments/{}/chat/completions?api-version={API_VERSION}",
                config.model
            ),
        );
        Self {
            completion_url,
            health_url: config.base_url.trim().trim_end_matches('/').to_string(),
            config,
            client: reqwest::Client::new(),
        }
    }
}

/// The endpoint exists if it answers at all, even with an auth challenge.
fn endpoint_reachable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
    )
}

#[async_trait]
impl sves_core::Provider for AzureGovProvider {
    fn name(&self) -> &str {
        "azure_gov"
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
        let api_key = self.config.api_key().ok_or_else(|| {
            ProviderError::MissingCredential("azure_gov requests need an api_key".into())
        })?;

        let messages = assemble_turns(system_prompt, history, prompt);
        let body = json!({
            "messages": http::to_api_messages(&messages),
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        });

        debug!(
            provider = "azure_gov",
            deployment = %self.config.model,
            turns = messages.len(),
            "Sending completion request"
        );

        let request = self
            .client
            .post(&self.completion_url)
            .header(API_KEY_HEADER, api_key);

        let response: ChatCompletion =
            http::post_json(request, &self.completion_url, self.config.timeout(), &body).await?;
        first_choice_text(response)
    }

    async fn health_check(&self) -> bool {
        let mut request = self.client.get(&self.health_url);
        if let Some(api_key) = self.config.api_key() {
            request = request.header(API_KEY_HEADER, api_key);
        }
        http::probe(request, &self.health_url, endpoint_reachable).await
    }
}
