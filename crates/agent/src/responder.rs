//! The conversation orchestrator: one question in, one answer or one
//! classified failure out.

use std::time::Instant;

use sves_core::backend::BackendKind;
use sves_core::error::ProviderError;
use sves_core::message::Message;
use sves_core::provider::Provider;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::prompt::build_system_prompt;

/// A failed answer, classified for the user.
#[derive(Debug, Clone, Error)]
pub enum RespondError {
    #[error("Cannot connect to LLM server. Please ensure your self-hosted model is running.\n\n{hint}")]
    Unavailable { detail: String, hint: String },

    #[error(
        "LLM request timed out. The model may be loading or the request is too complex.\n\
         Try a simpler query or increase the timeout setting."
    )]
    TimedOut { detail: String },

    #[error("LLM server error: {message}")]
    Backend {
        status_code: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Error generating response: {0}")]
    Generic(String),

    #[error("Query is empty")]
    EmptyQuery,
}

impl RespondError {
    /// Stable label for the failure class.
    pub fn category(&self) -> &'static str {
        match self {
            RespondError::Unavailable { .. } => "backend unavailable",
            RespondError::TimedOut { .. } => "request timed out",
            RespondError::Backend { .. } => "backend error",
            RespondError::Configuration(_) => "configuration error",
            RespondError::Generic(_) => "generic failure",
            RespondError::EmptyQuery => "empty query",
        }
    }

    /// The backend at `provider` did not answer its readiness probe.
    pub fn unreachable(provider: &dyn Provider) -> Self {
        RespondError::Unavailable {
            detail: format!("{} did not answer", provider.health_url()),
            hint: start_hint(provider),
        }
    }

    /// No adapter is active, so nothing could be asked.
    pub fn not_configured(reason: impl Into<String>) -> Self {
        RespondError::Configuration(ProviderError::NotConfigured(reason.into()).to_string())
    }

    /// Translate an adapter failure.
    pub fn from_provider(err: ProviderError, provider: &dyn Provider) -> Self {
        match err {
            ProviderError::Connection(detail) => RespondError::Unavailable {
                detail,
                hint: start_hint(provider),
            },
            ProviderError::Timeout(detail) => RespondError::TimedOut { detail },
            ProviderError::ApiError {
                status_code,
                message,
            } => RespondError::Backend {
                status_code: Some(status_code),
                message: format!("HTTP {status_code}: {message}"),
            },
            ProviderError::InvalidResponse(message) => RespondError::Backend {
                status_code: None,
                message,
            },
            other if other.is_configuration() => RespondError::Configuration(other.to_string()),
            other => RespondError::Generic(other.to_string()),
        }
    }
}

/// How to bring the backend up, phrased for its kind.
fn start_hint(provider: &dyn Provider) -> String {
    let model = provider.model();
    match provider.kind() {
        BackendKind::Ollama => format!("For Ollama: Run 'ollama serve' and 'ollama pull {model}'"),
        BackendKind::Vllm => format!(
            "For vLLM: Run 'python -m vllm.entrypoints.openai.api_server --model {model}'"
        ),
        BackendKind::LmStudio => {
            "For LM Studio: Load a model and start the local server".to_string()
        }
        BackendKind::CustomApi | BackendKind::AzureGov => format!(
            "Check that {} is reachable from this machine",
            provider.completion_url()
        ),
    }
}

/// Answer `query` with the given backend and prior turns.
///
/// The system prompt is rebuilt from the cached knowledge base and the
/// backend is called exactly once.
pub async fn respond(
    query: &str,
    provider: &dyn Provider,
    history: &[Message],
) -> Result<String, RespondError> {
    let system_prompt = build_system_prompt();
    let started = Instant::now();

    info!(
        provider = provider.name(),
        model = provider.model(),
        history = history.len(),
        "Generating response"
    );

    match provider.generate(query, system_prompt, history).await {
        Ok(reply) => {
            debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                chars = reply.len(),
                "Response received"
            );
            Ok(reply)
        }
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "Generation failed");
            Err(RespondError::from_provider(e, provider))
        }
    }
}
