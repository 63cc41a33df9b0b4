//! OpenAI provider implementation for LexQA
//!
//! This module implements the Provider trait for the OpenAI chat-completion
//! API (and compatible servers). Each question is sent as a single user
//! message; the first choice of the response is returned as the answer.

use crate::config::OpenAiConfig;
use crate::error::QaError;
use crate::providers::{AnswerResult, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI chat-completion provider
///
/// # Examples
///
/// ```no_run
/// use lexqa::config::OpenAiConfig;
/// use lexqa::providers::{OpenAiProvider, Provider};
///
/// # async fn example() -> Result<(), lexqa::error::QaError> {
/// let provider = OpenAiProvider::new(
///     OpenAiConfig::default(),
///     "sk-...".to_string(),
///     vec!["gpt-3.5-turbo".to_string()],
/// )?;
/// let answer = provider.answer("超速會被罰多少錢？", "gpt-3.5-turbo", 0.7).await?;
/// println!("{}", answer.text);
/// # Ok(())
/// # }
/// ```
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    supported_models: Vec<String>,
}

/// Request structure for the chat-completion API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response structure from the chat-completion API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

/// Error envelope returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Backend configuration (API base and timeout)
    /// * `api_key` - Resolved API key
    /// * `supported_models` - Model identifiers the provider accepts
    ///
    /// # Errors
    ///
    /// Returns `QaError::Authentication` if the key is blank, or
    /// `QaError::Config` if the HTTP client cannot be built
    pub fn new(
        config: OpenAiConfig,
        api_key: String,
        supported_models: Vec<String>,
    ) -> std::result::Result<Self, QaError> {
        if api_key.trim().is_empty() {
            return Err(QaError::Authentication("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("lexqa/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint = format!("{}/chat/completions", config.api_base.trim_end_matches('/'));

        tracing::info!(
            "Initialized OpenAI provider: endpoint={}, models={}",
            endpoint,
            supported_models.join(",")
        );

        Ok(Self {
            client,
            api_key,
            endpoint,
            supported_models,
        })
    }

    /// The full chat-completion URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Map a non-2xx response to the error taxonomy
    fn classify_error(status: StatusCode, body: &str) -> QaError {
        let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
        let message = parsed
            .as_ref()
            .map(|e| e.error.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.to_string());
        let code = parsed.and_then(|e| e.error.code);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                QaError::Authentication(format!("{}: {}", status, message))
            }
            StatusCode::NOT_FOUND if code.as_deref() == Some("model_not_found") => {
                QaError::InvalidModel(message)
            }
            _ => QaError::Upstream(format!("HTTP {}: {}", status, message)),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn answer(
        &self,
        question: &str,
        model: &str,
        temperature: f32,
    ) -> std::result::Result<AnswerResult, QaError> {
        if question.trim().is_empty() {
            return Err(QaError::EmptyInput);
        }
        self.validate_model(model)?;

        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: question,
            }],
            temperature,
            stream: false,
        };

        tracing::debug!(
            "Sending chat completion request: model={}, temperature={}",
            model,
            temperature
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat completion request failed: {}", e);
                QaError::Upstream(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Chat completion returned error {}: {}", status, body);
            return Err(Self::classify_error(status, &body));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat completion response: {}", e);
            QaError::Upstream(format!("Failed to parse response: {}", e))
        })?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| QaError::Upstream("Response contained no answer".to_string()))?;

        let mut answer = AnswerResult::new(
            text,
            chat_response.model.unwrap_or_else(|| model.to_string()),
        );
        if let Some(usage) = chat_response.usage {
            answer = answer.with_usage(TokenUsage::new(
                usage.prompt_tokens,
                usage.completion_tokens,
            ));
        }

        tracing::debug!(
            "Chat completion finished: {} chars, usage={:?}",
            answer.text.chars().count(),
            answer.usage
        );

        Ok(answer)
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn supported_models(&self) -> &[String] {
        &self.supported_models
    }
}
