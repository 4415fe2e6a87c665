//! HTTP plumbing shared by every adapter: error classification, the
//! readiness probe and the JSON completion call.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sves_core::error::ProviderError;
use sves_core::message::Message;
use tracing::{debug, warn};

/// Readiness probes never wait longer than this.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// A chat turn as every supported backend expects it on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ApiMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Convert our Message types to the `{role, content}` wire format.
pub(crate) fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
    messages
        .iter()
        .map(|m| ApiMessage {
            role: m.role.as_str().into(),
            content: Some(m.content.clone()),
        })
        .collect()
}

/// Map a transport failure onto the provider error taxonomy.
pub(crate) fn classify(err: reqwest::Error, url: &str, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(format!(
            "no response from {url} within {}s",
            timeout.as_secs()
        ))
    } else if err.is_connect() {
        ProviderError::Connection(format!("{url}: {err}"))
    } else if err.is_decode() || err.is_body() {
        ProviderError::InvalidResponse(err.to_string())
    } else {
        ProviderError::Network(err.to_string())
    }
}

/// Send a readiness probe. Any failure, including a rejected status, is `false`.
pub(crate) async fn probe(
    request: RequestBuilder,
    url: &str,
    accept: impl Fn(StatusCode) -> bool,
) -> bool {
    match request.timeout(HEALTH_CHECK_TIMEOUT).send().await {
        Ok(response) => {
            let status = response.status();
            debug!(url, status = status.as_u16(), "Health check answered");
            accept(status)
        }
        Err(e) => {
            debug!(url, error = %e, "Health check failed");
            false
        }
    }
}

/// POST a JSON body and decode the JSON reply.
///
/// Non-2xx statuses become [`ProviderError::ApiError`] carrying the body the
/// backend sent back; undecodable replies become
/// [`ProviderError::InvalidResponse`].
pub(crate) async fn post_json<B, T>(
    request: RequestBuilder,
    url: &str,
    timeout: Duration,
    body: &B,
) -> Result<T, ProviderError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = request
        .timeout(timeout)
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| classify(e, url, timeout))?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %error_body, "Backend returned error");
        let message = if error_body.trim().is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            error_body
        };
        return Err(ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| classify(e, url, timeout))?;

    serde_json::from_str(&text)
        .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))
}

/// Join a base address and a path without doubling the slash.
pub(crate) fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_conversion() {
        let messages = vec![
            Message::system("You are SVES"),
            Message::user("What is SCWO?"),
            Message::assistant("Supercritical water oxidation."),
        ];
        let api = to_api_messages(&messages);
        let roles: Vec<_> = api.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
        assert_eq!(api[1].content.as_deref(), Some("What is SCWO?"));
    }

    #[test]
    fn join_trims_trailing_slash() {
        assert_eq!(join("http://localhost:11434/", "/api/chat"), "http://localhost:11434/api/chat");
        assert_eq!(join("http://localhost:8000", "/health"), "http://localhost:8000/health");
    }
}
