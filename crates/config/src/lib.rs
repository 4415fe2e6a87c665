//! Configuration loading, validation, and management for SVES.
//!
//! Loads configuration from `~/.sves/config.toml` with environment
//! variable overrides. A backend configuration is validated before it is
//! activated; an invalid one never replaces the active one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sves_core::BackendKind;

/// Environment variables consulted by [`AppConfig::load`].
pub const ENV_BACKEND: &str = "SVES_BACKEND";
pub const ENV_BASE_URL: &str = "SVES_BASE_URL";
pub const ENV_MODEL: &str = "SVES_MODEL";
pub const ENV_API_KEY: &str = "SVES_API_KEY";
pub const ENV_AZURE_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_MAX_TOKENS: &str = "SVES_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "SVES_TEMPERATURE";
pub const ENV_TIMEOUT: &str = "SVES_TIMEOUT_SECS";

/// Prior turns sent with each question unless configured otherwise.
pub const DEFAULT_MAX_HISTORY_TURNS: usize = 20;

/// The root configuration structure.
///
/// Maps directly to `~/.sves/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Most recent chat turns sent along with each question
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    /// Default tracing filter for the CLI (`RUST_LOG` wins when set)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// The backend the session starts with
    #[serde(default)]
    pub backend: BackendConfig,
}

fn default_max_history_turns() -> usize {
    DEFAULT_MAX_HISTORY_TURNS
}

fn default_log_level() -> String {
    "warn".into()
}

/// One backend: where it lives, which model to ask, and how.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend family
    #[serde(default = "default_kind")]
    pub kind: BackendKind,

    /// Base address, e.g. `http://localhost:11434` (no trailing slash)
    #[serde(default)]
    pub base_url: String,

    /// Model identifier (Azure: deployment name)
    #[serde(default)]
    pub model: String,

    /// Credential for secured endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_kind() -> BackendKind {
    BackendKind::Ollama
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_temperature() -> f64 {
    0.7
}
fn default_timeout_secs() -> u64 {
    120
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &redact(&self.api_key))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Default address and model for each backend kind.
fn kind_defaults(kind: BackendKind) -> (&'static str, &'static str) {
    match kind {
        BackendKind::Ollama => ("http://localhost:11434", "llama3.1:70b"),
        BackendKind::Vllm | BackendKind::CustomApi => {
            ("http://localhost:8000", "meta-llama/Llama-3.1-70B-Instruct")
        }
        BackendKind::LmStudio => ("http://localhost:1234", "local-model"),
        BackendKind::AzureGov => ("https://your-resource.openai.azure.us", "gpt-4"),
    }
}

impl BackendConfig {
    /// The stock configuration for a backend kind.
    pub fn defaults_for(kind: BackendKind) -> Self {
        let (base_url, model) = kind_defaults(kind);
        Self {
            kind,
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Attach a credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The credential, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Fill blank address/model with the kind's defaults and normalize the URL.
    pub fn normalize(&mut self) {
        let (base_url, model) = kind_defaults(self.kind);
        if self.base_url.trim().is_empty() {
            self.base_url = base_url.into();
        }
        if self.model.trim().is_empty() {
            self.model = model.into();
        }
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
    }

    /// Update one field from its textual form.
    ///
    /// Switching `kind` resets the address and model to that kind's defaults,
    /// so a later `url=`/`model=` in the same batch still wins.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "kind" | "backend" | "provider" => {
                let kind: BackendKind = value
                    .parse()
                    .map_err(|_| ConfigError::UnknownBackend(value.to_string()))?;
                if kind != self.kind {
                    let (base_url, model) = kind_defaults(kind);
                    self.kind = kind;
                    self.base_url = base_url.into();
                    self.model = model.into();
                }
            }
            "url" | "base_url" => {
                self.base_url = value.trim().trim_end_matches('/').to_string();
            }
            "model" => self.model = value.trim().to_string(),
            "api_key" | "key" => {
                let value = value.trim();
                self.api_key = (!value.is_empty()).then(|| value.to_string());
            }
            "max_tokens" => self.max_tokens = value.trim().parse().map_err(|_| invalid())?,
            "temperature" => self.temperature = value.trim().parse().map_err(|_| invalid())?,
            "timeout" | "timeout_secs" => {
                self.timeout_secs = value.trim().parse().map_err(|_| invalid())?
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Check the activation invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError("base_url must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError("max_tokens must be > 0".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError("timeout_secs must be > 0".into()));
        }
        if self.kind.requires_api_key() && self.api_key().is_none() {
            return Err(ConfigError::MissingApiKey(self.kind));
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::defaults_for(default_kind())
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.sves/config.toml),
    /// then apply environment overrides:
    /// - `SVES_BACKEND`, `SVES_BASE_URL`, `SVES_MODEL`
    /// - `SVES_API_KEY` (or `AZURE_OPENAI_API_KEY` for azure_gov)
    /// - `SVES_MAX_TOKENS`, `SVES_TEMPERATURE`, `SVES_TIMEOUT_SECS`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    ///
    /// The backend is not validated here: a missing credential is reported
    /// when the backend is activated, not when the file is read.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.backend.normalize();
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = [
            (ENV_BACKEND, "kind"),
            (ENV_BASE_URL, "base_url"),
            (ENV_MODEL, "model"),
            (ENV_API_KEY, "api_key"),
            (ENV_MAX_TOKENS, "max_tokens"),
            (ENV_TEMPERATURE, "temperature"),
            (ENV_TIMEOUT, "timeout_secs"),
        ];
        for (var, key) in overrides {
            if let Some(value) = lookup(var) {
                tracing::debug!(var, "Applying environment override");
                self.backend.set(key, &value)?;
            }
        }

        if self.backend.kind == BackendKind::AzureGov && self.backend.api_key().is_none() {
            self.backend.api_key = lookup(ENV_AZURE_API_KEY).filter(|k| !k.trim().is_empty());
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".sves")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Generate a default config TOML string (for `init`).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            max_history_turns: default_max_history_turns(),
            log_level: default_log_level(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Backend '{0}' requires an api_key")]
    MissingApiKey(BackendKind),

    #[error("Unsupported backend kind: {0}")]
    UnknownBackend(String),

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn default_config_targets_local_ollama() {
        let config = AppConfig::default();
        assert_eq!(config.backend.kind, BackendKind::Ollama);
        assert_eq!(config.backend.base_url, "http://localhost:11434");
        assert_eq!(config.backend.model, "llama3.1:70b");
        assert_eq!(config.backend.max_tokens, 4096);
        assert_eq!(config.backend.timeout_secs, 120);
        assert_eq!(config.max_history_turns, 20);
        assert!(config.backend.validate().is_ok());
    }

    #[test]
    fn kind_defaults_cover_every_backend() {
        let lm = BackendConfig::defaults_for(BackendKind::LmStudio);
        assert_eq!(lm.base_url, "http://localhost:1234");
        assert_eq!(lm.model, "local-model");

        let vllm = BackendConfig::defaults_for(BackendKind::Vllm);
        assert_eq!(vllm.base_url, "http://localhost:8000");

        let azure = BackendConfig::defaults_for(BackendKind::AzureGov);
        assert!(azure.base_url.ends_with(".azure.us"));
        assert_eq!(azure.model, "gpt-4");
    }

    #[test]
    fn azure_requires_credential() {
        let azure = BackendConfig::defaults_for(BackendKind::AzureGov);
        assert!(matches!(
            azure.validate(),
            Err(ConfigError::MissingApiKey(BackendKind::AzureGov))
        ));
        assert!(azure.clone().with_api_key("   ").validate().is_err());
        assert!(azure.with_api_key("secret").validate().is_ok());
    }

    #[test]
    fn empty_address_or_model_rejected() {
        let mut config = BackendConfig::default();
        config.base_url.clear();
        assert!(config.validate().is_err());

        let mut config = BackendConfig::default();
        config.model = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = BackendConfig {
            temperature: 5.0,
            ..BackendConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn set_switches_kind_and_resets_address() {
        let mut config = BackendConfig::default();
        config.set("kind", "lm_studio").unwrap();
        assert_eq!(config.kind, BackendKind::LmStudio);
        assert_eq!(config.base_url, "http://localhost:1234");

        config.set("url", "http://gpu-box:1234/").unwrap();
        assert_eq!(config.base_url, "http://gpu-box:1234");

        config.set("temperature", "0.2").unwrap();
        assert!((config.temperature - 0.2).abs() < f64::EPSILON);

        assert!(matches!(
            config.set("max_tokens", "lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(config.set("colour", "red"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            config.set("kind", "bedrock"),
            Err(ConfigError::UnknownBackend(_))
        ));
    }

    #[test]
    fn env_overrides_apply_in_order() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                (ENV_BACKEND, "vllm"),
                (ENV_MODEL, "mistral-7b"),
                (ENV_TIMEOUT, "30"),
            ]))
            .unwrap();
        assert_eq!(config.backend.kind, BackendKind::Vllm);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.model, "mistral-7b");
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn azure_key_falls_back_to_azure_env_var() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[(ENV_BACKEND, "azure_gov"), (ENV_AZURE_API_KEY, "az-key")]))
            .unwrap();
        assert_eq!(config.backend.api_key(), Some("az-key"));
        assert!(config.backend.validate().is_ok());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.backend.kind, BackendKind::Ollama);
    }

    #[test]
    fn partial_file_fills_kind_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "max_history_turns = 6\n\n[backend]\nkind = \"lm_studio\"\ntemperature = 0.3"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.max_history_turns, 6);
        assert_eq!(config.backend.kind, BackendKind::LmStudio);
        assert_eq!(config.backend.base_url, "http://localhost:1234");
        assert_eq!(config.backend.model, "local-model");
        assert!((config.backend.temperature - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend\nkind = ").unwrap();
        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn default_toml_roundtrip() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("ollama"));
        assert!(toml_str.contains("11434"));
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.backend.kind, BackendKind::Ollama);
        assert_eq!(parsed.backend.model, "llama3.1:70b");
        assert_eq!(parsed.log_level, "warn");
        assert_eq!(parsed.max_history_turns, DEFAULT_MAX_HISTORY_TURNS);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = BackendConfig::defaults_for(BackendKind::AzureGov).with_api_key("top-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
