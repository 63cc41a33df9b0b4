//! Query lifecycle
//!
//! `QueryController` runs one question from input to history:
//!
//! 1. trim the input and reject it if empty (no state change)
//! 2. count the submission
//! 3. ask the provider with the selected model and configured temperature
//! 4. on success, append a new record to the history and optionally export it
//! 5. on failure, report the error; the submission stays counted
//!
//! Submissions are serialized by `&mut self`: no other mutation can run
//! while a model call is outstanding.

use crate::config::Config;
use crate::error::QaError;
use crate::export::ResultExporter;
use crate::providers::Provider;
use crate::session::{QueryRecord, SessionStore};
use std::path::PathBuf;

/// Result of a submission attempt
#[derive(Debug)]
pub enum Outcome {
    /// The input was rejected before anything was counted or sent
    Rejected(QaError),
    /// The model answered and the record was added to the history
    Completed {
        /// The new history entry
        record: QueryRecord,
        /// Auto-export result; `None` when auto-export is disabled
        export: Option<std::result::Result<PathBuf, QaError>>,
    },
    /// The model call failed; the submission remains counted
    Failed(QaError),
}

impl Outcome {
    /// Returns true if the outcome is `Completed`
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// The completed record, if any
    pub fn record(&self) -> Option<&QueryRecord> {
        match self {
            Self::Completed { record, .. } => Some(record),
            _ => None,
        }
    }
}

/// Orchestrates questions against a session and a provider
pub struct QueryController {
    session: SessionStore,
    provider: Box<dyn Provider>,
    temperature: f32,
    exporter: ResultExporter,
    auto_export: bool,
}

impl QueryController {
    /// Create a controller for a fresh session
    ///
    /// # Arguments
    ///
    /// * `provider` - Model backend
    /// * `session` - Session state owned by this controller
    /// * `temperature` - Sampling temperature for every question
    /// * `exporter` - Exporter for explicit and automatic exports
    pub fn new(
        provider: Box<dyn Provider>,
        session: SessionStore,
        temperature: f32,
        exporter: ResultExporter,
    ) -> Self {
        Self {
            session,
            provider,
            temperature,
            exporter,
            auto_export: false,
        }
    }

    /// Build a controller and session from configuration
    ///
    /// # Errors
    ///
    /// Returns `QaError::InvalidModel` if the configured default model is
    /// not in the supported set
    pub fn from_config(
        config: &Config,
        provider: Box<dyn Provider>,
    ) -> std::result::Result<Self, QaError> {
        let session =
            SessionStore::new(config.model.default.clone(), config.model.supported.clone())?;
        let exporter = ResultExporter::new(config.session.output_dir.clone());
        Ok(Self::new(provider, session, config.model.temperature, exporter)
            .with_auto_export(config.session.auto_export))
    }

    /// Enable or disable exporting every completed answer
    pub fn with_auto_export(mut self, enabled: bool) -> Self {
        self.auto_export = enabled;
        self
    }

    /// Submit a question
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lexqa::controller::{Outcome, QueryController};
    ///
    /// # async fn example(controller: &mut QueryController) {
    /// match controller.submit("闖紅燈的處罰規定是什麼？").await {
    ///     Outcome::Completed { record, .. } => println!("{}", record.response()),
    ///     Outcome::Rejected(reason) => eprintln!("{}", reason),
    ///     Outcome::Failed(error) => eprintln!("{}", error),
    /// }
    /// # }
    /// ```
    pub async fn submit(&mut self, question: &str) -> Outcome {
        let question = question.trim();
        if question.is_empty() {
            tracing::debug!("Rejected empty submission");
            return Outcome::Rejected(QaError::EmptyInput);
        }

        self.session.record_submission();

        let model = self.session.selected_model().to_string();
        tracing::debug!(
            provider = self.provider.name(),
            model = %model,
            "Submitting question"
        );

        let answer = match self
            .provider
            .answer(question, &model, self.temperature)
            .await
        {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Question failed: {}", e);
                return Outcome::Failed(e);
            }
        };

        let record = QueryRecord::new(question, answer.text, model);
        self.session.append_record(record.clone());
        tracing::info!(
            total_queries = self.session.total_queries(),
            history_len = self.session.history().len(),
            "Question answered"
        );

        let export = if self.auto_export {
            let result = self.exporter.export(&record);
            if let Err(e) = &result {
                tracing::warn!("Automatic export failed: {}", e);
            }
            Some(result)
        } else {
            None
        };

        Outcome::Completed { record, export }
    }

    /// Export a record on demand
    ///
    /// # Errors
    ///
    /// Returns `QaError::Io` if the file cannot be written; the session
    /// is not affected
    pub fn export(&self, record: &QueryRecord) -> std::result::Result<PathBuf, QaError> {
        self.exporter.export(record)
    }

    /// Select the model for subsequent questions
    pub fn set_model(&mut self, identifier: &str) -> std::result::Result<(), QaError> {
        self.session.set_model(identifier)
    }

    /// Record a 1-5 rating
    pub fn set_rating(&mut self, score: i64) -> std::result::Result<(), QaError> {
        self.session.set_rating(score)
    }

    /// Clear the history; the submission counter is kept
    pub fn clear_history(&mut self) {
        self.session.clear_history();
    }

    /// Read-only access to the session
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Sampling temperature used for every question
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Whether every completed answer is exported
    pub fn auto_export(&self) -> bool {
        self.auto_export
    }

    /// Exporter used by this controller
    pub fn exporter(&self) -> &ResultExporter {
        &self.exporter
    }

    /// Name of the provider answering questions
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
