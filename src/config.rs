//! Configuration management for LexQA
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{QaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Keyring service name under which the API key is stored
pub const KEYRING_SERVICE: &str = "lexqa";

/// Keyring user name under which the API key is stored
pub const KEYRING_USER: &str = "openai";

/// Environment variable holding the model backend API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main configuration structure for LexQA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model backend configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Model selection and sampling settings
    #[serde(default)]
    pub model: ModelConfig,
    /// Session and export settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Provider configuration
///
/// Specifies which model backend to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type")]
    pub provider_type: String,

    /// OpenAI-compatible backend configuration
    #[serde(default)]
    pub openai: OpenAiConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: "openai".to_string(),
            openai: OpenAiConfig::default(),
        }
    }
}

/// OpenAI-compatible chat-completion backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL; `/chat/completions` is appended to it
    ///
    /// Overriding this lets tests point the provider at a mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key; the environment variable and the keyring are preferred
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Model selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model selected when a session starts
    #[serde(default = "default_model")]
    pub default: String,

    /// Model identifiers a session may switch between
    #[serde(default = "default_supported_models")]
    pub supported: Vec<String>,

    /// Sampling temperature passed with every request
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_supported_models() -> Vec<String> {
    vec!["gpt-3.5-turbo".to_string(), "gpt-4".to_string()]
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
            supported: default_supported_models(),
            temperature: default_temperature(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory exported answers are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Export every completed answer automatically
    #[serde(default = "default_auto_export")]
    pub auto_export: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_auto_export() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            auto_export: default_auto_export(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment overrides
    ///
    /// Per-command flags are applied afterwards with `with_overrides`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            provider: ProviderConfig::default(),
            model: ModelConfig::default(),
            session: SessionConfig::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QaError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| QaError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("LEXQA_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(api_base) = std::env::var("LEXQA_API_BASE") {
            tracing::debug!(api_base = %api_base, "Env override: LEXQA_API_BASE");
            self.provider.openai.api_base = api_base;
        }

        if let Ok(timeout) = std::env::var("LEXQA_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(v) => self.provider.openai.timeout_seconds = v,
                Err(_) => tracing::warn!("Invalid LEXQA_TIMEOUT_SECONDS: {}", timeout),
            }
        }

        if let Ok(model) = std::env::var("LEXQA_MODEL") {
            tracing::debug!(model = %model, "Env override: LEXQA_MODEL");
            self.model.default = model;
        }

        if let Ok(temperature) = std::env::var("LEXQA_TEMPERATURE") {
            match temperature.parse::<f32>() {
                Ok(v) => self.model.temperature = v,
                Err(_) => tracing::warn!("Invalid LEXQA_TEMPERATURE: {}", temperature),
            }
        }

        if let Ok(output_dir) = std::env::var("LEXQA_OUTPUT_DIR") {
            tracing::debug!(output_dir = %output_dir, "Env override: LEXQA_OUTPUT_DIR");
            self.session.output_dir = PathBuf::from(output_dir);
        }

        if let Ok(auto_export) = std::env::var("LEXQA_AUTO_EXPORT") {
            match auto_export.parse::<bool>() {
                Ok(v) => self.session.auto_export = v,
                Err(_) => tracing::warn!("Invalid LEXQA_AUTO_EXPORT: {}", auto_export),
            }
        }
    }

    /// Apply per-command overrides from the command line
    ///
    /// Only the values that were supplied replace configured ones;
    /// `no_export` can disable auto-export but never enable it.
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        temperature: Option<f32>,
        output_dir: Option<PathBuf>,
        no_export: bool,
    ) -> Self {
        if let Some(model) = model {
            self.model.default = model;
        }
        if let Some(temperature) = temperature {
            self.model.temperature = temperature;
        }
        if let Some(output_dir) = output_dir {
            self.session.output_dir = output_dir;
        }
        if no_export {
            self.session.auto_export = false;
        }
        self
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(QaError::Config("Provider type cannot be empty".to_string()).into());
        }

        let valid_providers = ["openai"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(QaError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.openai.timeout_seconds == 0 {
            return Err(QaError::Config(
                "provider.openai.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.model.supported.is_empty() {
            return Err(
                QaError::Config("model.supported must list at least one model".to_string()).into(),
            );
        }

        if !self.model.supported.contains(&self.model.default) {
            return Err(QaError::Config(format!(
                "model.default '{}' is not one of the supported models: {}",
                self.model.default,
                self.model.supported.join(", ")
            ))
            .into());
        }

        if !self.model.temperature.is_finite() || !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(QaError::Config(
                "model.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if self.session.output_dir.as_os_str().is_empty() {
            return Err(
                QaError::Config("session.output_dir cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }

    /// Resolve the API key for the model backend
    ///
    /// Looks at the `OPENAI_API_KEY` environment variable, then the
    /// configuration file, then the system keyring.
    ///
    /// # Errors
    ///
    /// Returns `QaError::Authentication` if no non-empty key is found
    pub fn resolve_api_key(&self) -> std::result::Result<String, QaError> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                tracing::debug!("Using API key from {}", API_KEY_ENV);
                return Ok(key.trim().to_string());
            }
        }

        if let Some(key) = self.provider.openai.api_key.as_deref() {
            if !key.trim().is_empty() {
                tracing::debug!("Using API key from configuration file");
                return Ok(key.trim().to_string());
            }
        }

        match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).and_then(|e| e.get_password()) {
            Ok(key) if !key.trim().is_empty() => {
                tracing::debug!("Using API key from system keyring");
                Ok(key.trim().to_string())
            }
            Ok(_) | Err(keyring::Error::NoEntry) => Err(QaError::Authentication(format!(
                "No API key configured. Set {} or run `lexqa auth`",
                API_KEY_ENV
            ))),
            Err(e) => {
                tracing::warn!("Failed to read API key from keyring: {}", e);
                Err(QaError::Authentication(format!(
                    "No usable API key found ({}). Set {} or run `lexqa auth`",
                    e, API_KEY_ENV
                )))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
