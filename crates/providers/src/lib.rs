//! LLM backend adapters for SVES.
//!
//! All adapters implement the `sves_core::Provider` trait.
//! The factory selects the correct adapter for a backend configuration.

pub mod azure_gov;
pub mod factory;
mod http;
pub mod ollama;
pub mod openai_compat;

#[cfg(test)]
mod test_support;

pub use azure_gov::AzureGovProvider;
pub use factory::{ProviderFactory, create_provider};
pub use http::HEALTH_CHECK_TIMEOUT;
pub use ollama::OllamaProvider;
pub use openai_compat::OpenAiCompatProvider;
