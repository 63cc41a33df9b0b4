#![allow(dead_code)]

use async_trait::async_trait;
use lexqa::error::QaError;
use lexqa::providers::{AnswerResult, Provider};
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Calls seen by a `StubProvider`: (question, model, temperature)
pub type CallLog = Arc<Mutex<Vec<(String, String, f32)>>>;

/// Provider that replays queued replies and records every call
///
/// When the queue is empty it answers with a fixed text.
pub struct StubProvider {
    models: Vec<String>,
    replies: Mutex<VecDeque<Result<String, QaError>>>,
    calls: CallLog,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            models: vec!["gpt-3.5-turbo".to_string(), "gpt-4".to_string()],
            replies: Mutex::new(VecDeque::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn reply(self, reply: Result<&str, QaError>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(reply.map(str::to_string));
        self
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    pub fn supported(&self) -> Vec<String> {
        self.models.clone()
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn answer(
        &self,
        question: &str,
        model: &str,
        temperature: f32,
    ) -> Result<AnswerResult, QaError> {
        self.calls
            .lock()
            .unwrap()
            .push((question.to_string(), model.to_string(), temperature));
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("stub answer".to_string()));
        reply.map(|text| AnswerResult::new(text, model))
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn supported_models(&self) -> &[String] {
        &self.models
    }
}

pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
