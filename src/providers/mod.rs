//! Provider module for LexQA
//!
//! This module contains the model backend abstraction and the OpenAI
//! chat-completion implementation.

pub mod base;
pub mod openai;

pub use base::{AnswerResult, Provider, TokenUsage};
pub use openai::OpenAiProvider;

use crate::config::Config;
use crate::error::QaError;

/// Create a provider instance based on configuration
///
/// The API key is resolved here, once, at startup; a missing key is
/// reported before any question is asked.
///
/// # Errors
///
/// Returns `QaError::Config` for an unknown provider type and
/// `QaError::Authentication` if no API key can be found
pub fn create_provider(config: &Config) -> std::result::Result<Box<dyn Provider>, QaError> {
    match config.provider.provider_type.as_str() {
        "openai" => {
            let api_key = config.resolve_api_key()?;
            Ok(Box::new(OpenAiProvider::new(
                config.provider.openai.clone(),
                api_key,
                config.model.supported.clone(),
            )?))
        }
        other => Err(QaError::Config(format!("Unknown provider type: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_create_provider_invalid_type() {
        let mut config = Config::default();
        config.provider.provider_type = "invalid".to_string();

        let result = create_provider(&config);
        assert!(matches!(result, Err(QaError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_create_provider_with_configured_key() {
        std::env::remove_var(crate::config::API_KEY_ENV);
        let mut config = Config::default();
        config.provider.openai.api_key = Some("sk-test".to_string());

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.supported_models(), config.model.supported.as_slice());
    }

    #[test]
    #[serial]
    fn test_create_provider_with_env_key() {
        std::env::set_var(crate::config::API_KEY_ENV, "sk-env");
        let result = create_provider(&Config::default());
        std::env::remove_var(crate::config::API_KEY_ENV);

        assert!(result.is_ok());
    }
}
