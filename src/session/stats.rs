//! Usage statistics derived from a session snapshot

use crate::session::SessionSnapshot;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary counters for the statistics panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Questions submitted this session
    pub total_queries: u64,
    /// Exchanges currently held in the history
    pub completed: usize,
    /// Submissions with no record in the history (failed or cleared)
    pub unrecorded: u64,
    /// Completed exchanges per model
    pub per_model: BTreeMap<String, usize>,
}

impl SessionStats {
    /// Compute statistics from a snapshot
    ///
    /// # Examples
    ///
    /// ```
    /// use lexqa::session::{SessionStats, SessionStore};
    ///
    /// let mut store = SessionStore::new("gpt-4", vec!["gpt-4".to_string()]).unwrap();
    /// store.record_submission();
    /// let stats = SessionStats::from_snapshot(&store.snapshot());
    /// assert_eq!(stats.unrecorded, 1);
    /// ```
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let mut per_model = BTreeMap::new();
        for record in &snapshot.history {
            *per_model.entry(record.model().to_string()).or_insert(0) += 1;
        }
        let completed = snapshot.history.len();
        Self {
            total_queries: snapshot.total_queries,
            completed,
            unrecorded: snapshot.total_queries.saturating_sub(completed as u64),
            per_model,
        }
    }
}
