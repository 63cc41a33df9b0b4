//! Completed question/answer exchanges

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display format of a record's timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One completed question/answer exchange
///
/// Records are created once per successful query and never modified.
/// Fields are private; use the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    #[serde(with = "timestamp_serde")]
    timestamp: NaiveDateTime,
    query: String,
    response: String,
    model: String,
}

impl QueryRecord {
    /// Create a record stamped with the current local time
    ///
    /// # Examples
    ///
    /// ```
    /// use lexqa::session::QueryRecord;
    ///
    /// let record = QueryRecord::new("question", "answer", "gpt-3.5-turbo");
    /// assert_eq!(record.query(), "question");
    /// assert_eq!(record.timestamp().len(), "YYYY-MM-DD HH:MM:SS".len());
    /// ```
    pub fn new(
        query: impl Into<String>,
        response: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(Local::now().naive_local(), query, response, model)
    }

    /// Create a record with an explicit timestamp
    pub fn with_timestamp(
        timestamp: NaiveDateTime,
        query: impl Into<String>,
        response: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            query: query.into(),
            response: response.into(),
            model: model.into(),
        }
    }

    /// Completion time formatted as `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Completion time
    pub fn created_at(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// The trimmed question text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The model's answer text
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Model identifier used for this exchange
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The question shortened to `max_chars` characters, with `...` appended
    /// when anything was cut
    pub fn query_preview(&self, max_chars: usize) -> String {
        let mut chars = self.query.chars();
        let preview: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", preview)
        } else {
            preview
        }
    }
}

mod timestamp_serde {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
