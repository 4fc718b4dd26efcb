//! Finished-attempt payload and the sinks that accept it.
//!
//! Sinks are called once per submit. They do not retry or queue; a failure goes
//! back to the caller as-is and the attempt stays live so the caller can retry.

use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

use crate::config::{SinkKind, SubmissionCfg};
use crate::domain::{AnswerRecord, Identity, QuestionId};
use crate::error::SinkError;
use crate::session::SessionState;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
  pub name: String,
  pub age: u32,
  pub answers: BTreeMap<QuestionId, AnswerRecord>,
  pub total_questions: usize,
  pub timestamp: DateTime<Utc>,
}

impl SubmissionPayload {
  pub fn new(identity: &Identity, session: &SessionState, timestamp: DateTime<Utc>) -> Self {
    Self {
      name: identity.name.clone(),
      age: identity.age,
      answers: session.answers().clone(),
      total_questions: session.total(),
      timestamp,
    }
  }
}

#[async_trait]
pub trait SubmissionSink: Send + Sync {
  fn name(&self) -> &'static str;
  async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SinkError>;
}

/// Writes each submission to the log. Never fails once serialized.
#[derive(Clone, Debug, Default)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
  fn name(&self) -> &'static str { "log" }

  async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SinkError> {
    let json = serde_json::to_string(payload)?;
    info!(target: "attempt", name = %payload.name, answered = payload.answers.len(), total = payload.total_questions, %json, "Submitted data");
    Ok(())
  }
}

/// Appends one JSON object per line to a file.
#[derive(Clone, Debug)]
pub struct JsonLinesSink {
  path: PathBuf,
}

impl JsonLinesSink {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &std::path::Path { &self.path }
}

#[async_trait]
impl SubmissionSink for JsonLinesSink {
  fn name(&self) -> &'static str { "json_lines" }

  #[instrument(level = "debug", skip(self, payload), fields(path = %self.path.display()))]
  async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SinkError> {
    let mut line = serde_json::to_vec(payload)?;
    line.push(b'\n');
    let mut file = tokio::fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)
      .await?;
    file.write_all(&line).await?;
    file.flush().await?;
    Ok(())
  }
}

/// Build the sink named by configuration. `json_lines` without a path falls back to `submissions.jsonl`.
pub fn sink_from_config(cfg: &SubmissionCfg) -> Arc<dyn SubmissionSink> {
  match cfg.sink {
    SinkKind::Log => Arc::new(LogSink),
    SinkKind::JsonLines => {
      let path = cfg.path.clone().unwrap_or_else(|| PathBuf::from("submissions.jsonl"));
      Arc::new(JsonLinesSink::new(path))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::Catalog;
  use crate::seeds::seed_questions;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn empty_payload() -> SubmissionPayload {
    let catalog = Catalog::new(seed_questions()).unwrap();
    let session = SessionState::new(&catalog, &mut StdRng::seed_from_u64(5));
    let identity = Identity { name: "Ada".into(), age: 30 };
    SubmissionPayload::new(&identity, &session, Utc::now())
  }

  #[test]
  fn unanswered_session_still_builds_payload() {
    let p = empty_payload();
    assert!(p.answers.is_empty());
    assert_eq!(p.total_questions, seed_questions().len());
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["totalQuestions"], seed_questions().len());
    assert_eq!(json["answers"], serde_json::json!({}));
  }

  #[tokio::test]
  async fn json_lines_sink_appends() {
    let path = std::env::temp_dir().join(format!("shade-assessment-{}.jsonl", uuid::Uuid::new_v4()));
    let sink = JsonLinesSink::new(&path);
    let p = empty_payload();
    sink.submit(&p).await.unwrap();
    sink.submit(&p).await.unwrap();

    let text = tokio::fs::read_to_string(&path).await.unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let back: SubmissionPayload = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(back, p);
    let _ = tokio::fs::remove_file(&path).await;
  }

  #[tokio::test]
  async fn json_lines_sink_reports_io_failure() {
    let dir = std::env::temp_dir().join(format!("shade-assessment-missing-{}", uuid::Uuid::new_v4()));
    let sink = JsonLinesSink::new(dir.join("nested").join("out.jsonl"));
    let err = sink.submit(&empty_payload()).await.unwrap_err();
    assert!(matches!(err, SinkError::Io(_)));
  }
}
