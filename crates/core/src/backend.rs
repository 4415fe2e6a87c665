//! The fixed set of backend kinds a session can be pointed at.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProviderError;

/// A supported LLM backend family.
///
/// Several kinds share a wire protocol (vLLM, LM Studio and custom endpoints
/// all speak the OpenAI chat-completions dialect); the adapter factory decides
/// which implementation serves each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Ollama local server (`/api/chat`)
    Ollama,
    /// vLLM OpenAI-compatible server
    Vllm,
    /// LM Studio local server
    LmStudio,
    /// Any other OpenAI-compatible endpoint
    CustomApi,
    /// Azure OpenAI in a government cloud region
    AzureGov,
}

impl BackendKind {
    /// Every kind, in the order they are presented to users.
    pub const ALL: [BackendKind; 5] = [
        BackendKind::Ollama,
        BackendKind::Vllm,
        BackendKind::LmStudio,
        BackendKind::CustomApi,
        BackendKind::AzureGov,
    ];

    /// The canonical identifier used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Ollama => "ollama",
            BackendKind::Vllm => "vllm",
            BackendKind::LmStudio => "lm_studio",
            BackendKind::CustomApi => "custom_api",
            BackendKind::AzureGov => "azure_gov",
        }
    }

    /// Whether requests to this backend must carry a credential.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, BackendKind::AzureGov)
    }

    /// Whether a credential is sent at all when one is configured.
    pub fn accepts_api_key(&self) -> bool {
        matches!(
            self,
            BackendKind::Vllm | BackendKind::CustomApi | BackendKind::AzureGov
        )
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "ollama" => Ok(BackendKind::Ollama),
            "vllm" => Ok(BackendKind::Vllm),
            "lm_studio" | "lmstudio" => Ok(BackendKind::LmStudio),
            "custom_api" | "custom" => Ok(BackendKind::CustomApi),
            "azure_gov" | "azure" => Ok(BackendKind::AzureGov),
            _ => Err(ProviderError::UnsupportedBackend(s.to_string())),
        }
    }
}
