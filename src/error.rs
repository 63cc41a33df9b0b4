//! Error types for LexQA
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for LexQA operations
///
/// The variants fall into three families:
///
/// - validation (`EmptyInput`, `InvalidModel`, `InvalidRating`): raised before
///   any external call and never mutate session state
/// - model backend (`Authentication`, `Upstream`): surfaced as a failed outcome
/// - persistence (`Io`): raised by the result exporter
///
/// The remaining variants cover configuration and credential loading.
#[derive(Error, Debug)]
pub enum QaError {
    /// The submitted question was empty or whitespace only
    #[error("empty input")]
    EmptyInput,

    /// The model identifier is not in the supported set
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// A rating outside the 1-5 range was given
    #[error("Invalid rating: {0} (must be between 1 and 5)")]
    InvalidRating(i64),

    /// Missing or rejected credentials for the model backend
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network or service failure from the model backend
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl QaError {
    /// Returns true for errors that reject input before any external call
    ///
    /// # Examples
    ///
    /// ```
    /// use lexqa::error::QaError;
    ///
    /// assert!(QaError::EmptyInput.is_validation());
    /// assert!(!QaError::Upstream("timeout".to_string()).is_validation());
    /// ```
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::InvalidModel(_) | Self::InvalidRating(_)
        )
    }
}

/// Result type alias for LexQA operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
