//! Per-session state: history, submission counter, model selection, rating

use crate::error::QaError;
use crate::session::QueryRecord;
use serde::Serialize;

/// Lowest accepted rating
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating
pub const MAX_RATING: i64 = 5;

/// Mutable state of one user session
///
/// Each session owns its own store. Mutations take `&mut self`, so a
/// mutation is complete before any subsequent read can observe the store.
///
/// `total_queries` counts submissions, not successes: it is never
/// decremented, and clearing the history leaves it untouched, so
/// `total_queries() >= history().len()` always holds.
#[derive(Debug, Clone)]
pub struct SessionStore {
    history: Vec<QueryRecord>,
    total_queries: u64,
    selected_model: String,
    last_rating: Option<u8>,
    supported_models: Vec<String>,
}

/// Owned, read-only view of a session for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Completed exchanges, oldest first
    pub history: Vec<QueryRecord>,
    /// Number of submitted (non-empty) questions
    pub total_queries: u64,
    /// Currently selected model
    pub selected_model: String,
    /// Most recent rating, if any
    pub last_rating: Option<u8>,
}

impl SessionStore {
    /// Create an empty session
    ///
    /// # Errors
    ///
    /// Returns `QaError::InvalidModel` if `initial_model` is not in
    /// `supported_models`
    ///
    /// # Examples
    ///
    /// ```
    /// use lexqa::session::SessionStore;
    ///
    /// let store = SessionStore::new(
    ///     "gpt-3.5-turbo",
    ///     vec!["gpt-3.5-turbo".to_string(), "gpt-4".to_string()],
    /// ).unwrap();
    /// assert_eq!(store.total_queries(), 0);
    /// assert!(store.history().is_empty());
    /// ```
    pub fn new(
        initial_model: impl Into<String>,
        supported_models: Vec<String>,
    ) -> std::result::Result<Self, QaError> {
        let initial_model = initial_model.into();
        if !supported_models.contains(&initial_model) {
            return Err(QaError::InvalidModel(initial_model));
        }
        Ok(Self {
            history: Vec::new(),
            total_queries: 0,
            selected_model: initial_model,
            last_rating: None,
            supported_models,
        })
    }

    /// Count one submitted question
    pub fn record_submission(&mut self) {
        self.total_queries += 1;
        tracing::debug!(total_queries = self.total_queries, "Recorded submission");
    }

    /// Append a completed exchange to the end of the history
    pub fn append_record(&mut self, record: QueryRecord) {
        self.history.push(record);
    }

    /// Remove every record; the submission counter is kept
    pub fn clear_history(&mut self) {
        let removed = self.history.len();
        self.history.clear();
        tracing::info!(removed, "Cleared session history");
    }

    /// Select the model used for subsequent questions
    ///
    /// # Errors
    ///
    /// Returns `QaError::InvalidModel` if the identifier is unsupported;
    /// the selection is left unchanged
    pub fn set_model(&mut self, identifier: &str) -> std::result::Result<(), QaError> {
        if !self.supported_models.iter().any(|m| m == identifier) {
            return Err(QaError::InvalidModel(identifier.to_string()));
        }
        tracing::info!("Switched model from {} to {}", self.selected_model, identifier);
        self.selected_model = identifier.to_string();
        Ok(())
    }

    /// Record a 1-5 rating, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns `QaError::InvalidRating` outside 1-5; the previous rating
    /// is left unchanged
    pub fn set_rating(&mut self, score: i64) -> std::result::Result<(), QaError> {
        if !(MIN_RATING..=MAX_RATING).contains(&score) {
            return Err(QaError::InvalidRating(score));
        }
        self.last_rating = Some(score as u8);
        tracing::info!(score, "Recorded rating");
        Ok(())
    }

    /// Completed exchanges, oldest first
    pub fn history(&self) -> &[QueryRecord] {
        &self.history
    }

    /// Returns true if no exchange is in the history
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// The most recent completed exchange
    pub fn latest(&self) -> Option<&QueryRecord> {
        self.history.last()
    }

    /// Number of submitted (non-empty) questions
    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    /// Currently selected model
    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    /// Most recent rating, if any
    pub fn last_rating(&self) -> Option<u8> {
        self.last_rating
    }

    /// Models this session may switch between
    pub fn supported_models(&self) -> &[String] {
        &self.supported_models
    }

    /// Owned copy of the observable state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            history: self.history.clone(),
            total_queries: self.total_queries,
            selected_model: self.selected_model.clone(),
            last_rating: self.last_rating,
        }
    }
}
