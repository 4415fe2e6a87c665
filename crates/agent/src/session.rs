//! One user's chat session: the active backend plus the conversation so far.
//!
//! A session owns its configuration, adapter and history outright. Nothing is
//! shared between sessions and nothing lives in a global.

use std::sync::Arc;

use sves_config::{BackendConfig, ConfigError, DEFAULT_MAX_HISTORY_TURNS};
use sves_core::error::ProviderError;
use sves_core::message::{Conversation, Message};
use sves_core::provider::Provider;
use sves_providers::ProviderFactory;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::responder::{RespondError, respond};

/// Whether the session can currently reach a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No adapter has been activated.
    Unconfigured,
    /// The adapter answered its readiness probe.
    Connected,
    /// The adapter exists but the backend did not answer.
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Unconfigured => "unconfigured",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a configuration could not be activated.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A single user's chat session.
pub struct Session {
    factory: ProviderFactory,
    config: BackendConfig,
    provider: Option<Arc<dyn Provider>>,
    conversation: Conversation,
    max_history_turns: usize,
}

impl Session {
    /// Start a session on `config`, using the built-in adapters.
    ///
    /// An invalid configuration leaves the session unconfigured; the reason
    /// is logged and surfaces again on the first question.
    pub fn new(config: BackendConfig) -> Self {
        Self::with_factory(config, ProviderFactory::with_defaults())
    }

    /// Start a session with a custom adapter registry.
    pub fn with_factory(config: BackendConfig, factory: ProviderFactory) -> Self {
        let mut session = Self::unconfigured(config.clone(), factory);
        if let Err(e) = session.apply(config) {
            warn!(error = %e, "Starting without an active backend");
        }
        session
    }

    /// Start a session on an adapter built elsewhere.
    pub fn with_provider(config: BackendConfig, provider: Arc<dyn Provider>) -> Self {
        let mut session = Self::unconfigured(config, ProviderFactory::with_defaults());
        session.provider = Some(provider);
        session
    }

    fn unconfigured(config: BackendConfig, factory: ProviderFactory) -> Self {
        Self {
            factory,
            config,
            provider: None,
            conversation: Conversation::new(),
            max_history_turns: DEFAULT_MAX_HISTORY_TURNS,
        }
    }

    /// Cap the number of prior turns sent with each question.
    pub fn with_max_history_turns(mut self, max: usize) -> Self {
        self.max_history_turns = max;
        self
    }

    /// Validate `config`, build its adapter, then swap both in together.
    ///
    /// On failure the previously active configuration and adapter remain.
    pub fn apply(&mut self, mut config: BackendConfig) -> Result<(), SessionError> {
        config.normalize();
        config.validate()?;
        let provider = self.factory.create(&config)?;

        info!(
            kind = %config.kind,
            base_url = %config.base_url,
            model = %config.model,
            "Backend activated"
        );
        self.config = config;
        self.provider = Some(provider);
        Ok(())
    }

    /// Probe the active backend.
    pub async fn status(&self) -> ConnectionStatus {
        let Some(provider) = &self.provider else {
            return ConnectionStatus::Unconfigured;
        };
        if provider.health_check().await {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    /// Ask one question.
    ///
    /// Only a successful answer is recorded; a failed exchange leaves the
    /// history exactly as it was.
    pub async fn ask(&mut self, text: &str) -> Result<String, RespondError> {
        if text.trim().is_empty() {
            return Err(RespondError::EmptyQuery);
        }

        let provider = self.provider.clone().ok_or_else(|| {
            RespondError::not_configured(match self.config.validate() {
                Err(e) => e.to_string(),
                Ok(()) => "No backend is active".to_string(),
            })
        })?;

        if !provider.health_check().await {
            return Err(RespondError::unreachable(provider.as_ref()));
        }

        let history = self.conversation.recent(self.max_history_turns);
        debug!(
            sent = history.len(),
            held = self.conversation.len(),
            "Sending history window"
        );
        let reply = respond(text, provider.as_ref(), history).await?;

        self.conversation.push(Message::user(text));
        self.conversation.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Forget the conversation. The backend stays active.
    pub fn clear(&mut self) {
        self.conversation.clear();
    }

    pub fn history(&self) -> &[Message] {
        &self.conversation.messages
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn provider(&self) -> Option<&Arc<dyn Provider>> {
        self.provider.as_ref()
    }

    pub fn max_history_turns(&self) -> usize {
        self.max_history_turns
    }
}
