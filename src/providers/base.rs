//! Base provider trait and common types for LexQA
//!
//! This module defines the Provider trait every model backend implements,
//! along with the answer and token usage types it returns.

use crate::error::QaError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token usage information from a completion
///
/// Tracks the number of tokens used in prompts and completions,
/// as reported by the model backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use lexqa::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// The result of a successful model call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Generated answer text
    pub text: String,
    /// Model identifier that produced the answer
    pub model: String,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl AnswerResult {
    /// Create an answer without usage information
    ///
    /// # Examples
    ///
    /// ```
    /// use lexqa::providers::AnswerResult;
    ///
    /// let answer = AnswerResult::new("Hello!", "gpt-3.5-turbo");
    /// assert_eq!(answer.text, "Hello!");
    /// assert!(answer.usage.is_none());
    /// ```
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            usage: None,
        }
    }

    /// Attach token usage and return self for builder pattern
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Provider trait for model backends
///
/// A provider performs exactly one outbound request per `answer` call.
/// It never retries, caches, or streams; the caller treats every error as
/// terminal for that question.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use lexqa::error::QaError;
/// use lexqa::providers::{AnswerResult, Provider};
///
/// struct Canned(Vec<String>);
///
/// #[async_trait]
/// impl Provider for Canned {
///     async fn answer(&self, _q: &str, model: &str, _t: f32) -> Result<AnswerResult, QaError> {
///         self.validate_model(model)?;
///         Ok(AnswerResult::new("canned", model))
///     }
///     fn name(&self) -> &str {
///         "canned"
///     }
///     fn supported_models(&self) -> &[String] {
///         &self.0
///     }
/// }
///
/// let provider = Canned(vec!["gpt-4".to_string()]);
/// # tokio_test::block_on(async {
/// let answer = provider.answer("question", "gpt-4", 0.7).await.unwrap();
/// assert_eq!(answer.text, "canned");
/// assert!(provider.answer("question", "gpt-9", 0.7).await.is_err());
/// # });
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Answer a single question
    ///
    /// # Arguments
    ///
    /// * `question` - Question text, non-empty after trimming
    /// * `model` - Model identifier, one of `supported_models()`
    /// * `temperature` - Sampling temperature
    ///
    /// # Errors
    ///
    /// - `QaError::EmptyInput` if the question is blank
    /// - `QaError::InvalidModel` if the model is not supported
    /// - `QaError::Authentication` if the backend rejects the credential
    /// - `QaError::Upstream` for network and service failures
    async fn answer(
        &self,
        question: &str,
        model: &str,
        temperature: f32,
    ) -> std::result::Result<AnswerResult, QaError>;

    /// Short provider name used in logs and status output
    fn name(&self) -> &str;

    /// Model identifiers this provider accepts
    fn supported_models(&self) -> &[String];

    /// Check a model identifier against `supported_models()`
    fn validate_model(&self, model: &str) -> std::result::Result<(), QaError> {
        if self.supported_models().iter().any(|m| m == model) {
            Ok(())
        } else {
            Err(QaError::InvalidModel(model.to_string()))
        }
    }
}
