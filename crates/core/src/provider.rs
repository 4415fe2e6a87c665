//! Provider trait: the abstraction over LLM backends.
//!
//! A Provider knows how to send a conversation to one backend and get the
//! reply text back, and how to probe whether that backend is up.
//!
//! Implementations: Ollama, OpenAI-compatible (vLLM, LM Studio, custom),
//! Azure Government OpenAI.

use async_trait::async_trait;

use crate::backend::BackendKind;
use crate::error::ProviderError;
use crate::message::Message;

/// The core Provider trait.
///
/// Every backend implements this trait. The responder calls `generate()`
/// without knowing which backend is being used.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "ollama", "vllm").
    fn name(&self) -> &str;

    /// The backend kind this adapter was built for.
    fn kind(&self) -> BackendKind;

    /// The model identifier sent with each request.
    fn model(&self) -> &str;

    /// Full URL of the completion endpoint.
    fn completion_url(&self) -> &str;

    /// Full URL of the readiness probe.
    fn health_url(&self) -> &str;

    /// Send `[system] + history + [user prompt]` and return the reply text.
    ///
    /// Failures are propagated, never swallowed.
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        history: &[Message],
    ) -> std::result::Result<String, ProviderError>;

    /// Health check: can we reach the backend?
    ///
    /// Never fails: every error collapses into `false`.
    async fn health_check(&self) -> bool;
}
