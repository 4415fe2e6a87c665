//! Error types for the SVES domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

// --- Bounded context errors ---

/// Failures raised by a backend adapter.
///
/// The variants follow the failure taxonomy the orchestrator reports to users:
/// connectivity, timeout, protocol (status or envelope), configuration, other.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Cannot connect to backend: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Malformed response from backend: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: {0}")]
    MissingCredential(String),

    #[error("Unsupported backend kind: {0}")]
    UnsupportedBackend(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// True for failures caused by configuration rather than the network.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingCredential(_)
                | ProviderError::UnsupportedBackend(_)
                | ProviderError::NotConfigured(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 503,
            message: "model is loading".into(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("model is loading"));
    }

    #[test]
    fn configuration_failures_are_classified() {
        assert!(ProviderError::MissingCredential("azure_gov".into()).is_configuration());
        assert!(ProviderError::UnsupportedBackend("bedrock".into()).is_configuration());
        assert!(ProviderError::NotConfigured("no backend active".into()).is_configuration());
        assert!(!ProviderError::Timeout("120s".into()).is_configuration());
        assert!(!ProviderError::Connection("refused".into()).is_configuration());
    }
}
