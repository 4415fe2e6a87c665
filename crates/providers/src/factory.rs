//! Provider factory: maps a backend kind to the adapter that speaks its protocol.
//!
//! Adding a backend means writing an adapter and registering a constructor
//! here; nothing upstream of the factory changes.

use std::collections::HashMap;
use std::sync::Arc;

use sves_config::BackendConfig;
use sves_core::backend::BackendKind;
use sves_core::error::ProviderError;
use sves_core::provider::Provider;
use tracing::debug;

use crate::azure_gov::AzureGovProvider;
use crate::ollama::OllamaProvider;
use crate::openai_compat::OpenAiCompatProvider;

/// Builds an adapter from a backend configuration.
pub type Constructor = fn(BackendConfig) -> Arc<dyn Provider>;

/// Registry of adapter constructors keyed by backend kind.
#[derive(Clone)]
pub struct ProviderFactory {
    constructors: HashMap<BackendKind, Constructor>,
}

impl ProviderFactory {
    /// A factory that knows no backends.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A factory with every built-in adapter registered.
    pub fn with_defaults() -> Self {
        let mut factory = Self::empty();
        factory.register(BackendKind::Ollama, ollama);
        factory.register(BackendKind::Vllm, openai_compat);
        factory.register(BackendKind::LmStudio, openai_compat);
        factory.register(BackendKind::CustomApi, openai_compat);
        factory.register(BackendKind::AzureGov, azure_gov);
        factory
    }

    /// Register (or replace) the constructor for a kind.
    pub fn register(&mut self, kind: BackendKind, constructor: Constructor) {
        self.constructors.insert(kind, constructor);
    }

    pub fn supports(&self, kind: BackendKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<BackendKind> {
        BackendKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.supports(*kind))
            .collect()
    }

    /// Build the adapter for `config.kind`.
    pub fn create(&self, config: &BackendConfig) -> Result<Arc<dyn Provider>, ProviderError> {
        let kind = config.kind;
        let constructor = self
            .constructors
            .get(&kind)
            .ok_or_else(|| ProviderError::UnsupportedBackend(kind.to_string()))?;

        debug!(kind = %kind, base_url = %config.base_url, model = %config.model, "Creating provider");
        Ok(constructor(config.clone()))
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Build an adapter with the built-in registry.
pub fn create_provider(config: &BackendConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    ProviderFactory::with_defaults().create(config)
}

fn ollama(config: BackendConfig) -> Arc<dyn Provider> {
    Arc::new(OllamaProvider::new(config))
}

fn openai_compat(config: BackendConfig) -> Arc<dyn Provider> {
    Arc::new(OpenAiCompatProvider::new(config))
}

fn azure_gov(config: BackendConfig) -> Arc<dyn Provider> {
    Arc::new(AzureGovProvider::new(config))
}
