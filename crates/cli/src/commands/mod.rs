//! Subcommand implementations and the backend overrides they share.

pub mod ask;
pub mod backends;
pub mod chat;
pub mod init;
pub mod status;

use clap::Args;
use sves_agent::Session;
use sves_config::{AppConfig, BackendConfig, ConfigError, ENV_AZURE_API_KEY};
use tracing::debug;

/// Command-line overrides applied on top of the config file and environment.
#[derive(Args, Debug, Default, Clone)]
pub struct BackendArgs {
    /// Backend kind (ollama, vllm, lm_studio, custom_api, azure_gov)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Backend base URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Model identifier (Azure: deployment name)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// API key for secured endpoints
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Maximum tokens to generate
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl BackendArgs {
    /// Apply every flag that was given. The kind goes first so its defaults
    /// never clobber an explicit `--url` or `--model`.
    pub fn apply(&self, config: &mut BackendConfig) -> Result<(), ConfigError> {
        if let Some(kind) = &self.backend {
            config.set("kind", kind)?;
        }
        let overrides = [
            ("base_url", self.url.clone()),
            ("model", self.model.clone()),
            ("api_key", self.api_key.clone()),
            ("max_tokens", self.max_tokens.map(|v| v.to_string())),
            ("temperature", self.temperature.map(|v| v.to_string())),
            ("timeout_secs", self.timeout.map(|v| v.to_string())),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                config.set(key, &value)?;
            }
        }
        Ok(())
    }
}

/// Finish loading: surface a load failure, then layer the flags on top.
pub fn resolve(
    loaded: Result<AppConfig, ConfigError>,
    args: &BackendArgs,
) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = loaded.map_err(|e| format!("Failed to load config: {e}"))?;
    args.apply(&mut config.backend)?;

    // `--backend azure_gov` after the environment pass still picks up the Azure key.
    if config.backend.kind.requires_api_key() && config.backend.api_key().is_none() {
        if let Ok(key) = std::env::var(ENV_AZURE_API_KEY) {
            config.backend.set("api_key", &key)?;
        }
    }
    debug!(backend = ?config.backend, "Configuration resolved");
    Ok(config)
}

/// A fresh session for the loaded configuration.
pub fn open_session(config: &AppConfig) -> Session {
    Session::new(config.backend.clone()).with_max_history_turns(config.max_history_turns)
}

/// One-line description of a backend for banners and status output.
pub fn describe(config: &BackendConfig) -> String {
    format!("{} · {} · {}", config.kind, config.model, config.base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sves_core::BackendKind;

    #[test]
    fn no_flags_changes_nothing() {
        let mut config = BackendConfig::default();
        BackendArgs::default().apply(&mut config).unwrap();
        assert_eq!(config, BackendConfig::default());
    }

    #[test]
    fn backend_switch_then_explicit_url() {
        let args = BackendArgs {
            backend: Some("vllm".into()),
            url: Some("http://gpu-node:8000/".into()),
            temperature: Some(0.2),
            ..Default::default()
        };
        let mut config = BackendConfig::default();
        args.apply(&mut config).unwrap();

        assert_eq!(config.kind, BackendKind::Vllm);
        assert_eq!(config.base_url, "http://gpu-node:8000");
        assert_eq!(config.model, "meta-llama/Llama-3.1-70B-Instruct");
        assert!((config.temperature - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_backend_flag_rejected() {
        let args = BackendArgs {
            backend: Some("bard".into()),
            ..Default::default()
        };
        let err = args.apply(&mut BackendConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBackend(_)));
    }

    #[test]
    fn resolve_reports_load_failure() {
        let loaded = Err(ConfigError::ValidationError("broken".into()));
        let err = resolve(loaded, &BackendArgs::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config"));
    }

    #[test]
    fn session_uses_configured_history_cap() {
        let config = AppConfig {
            max_history_turns: 6,
            ..AppConfig::default()
        };
        let session = open_session(&config);
        assert_eq!(session.max_history_turns(), 6);
        assert_eq!(session.config().kind, BackendKind::Ollama);
    }
}
