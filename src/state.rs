//! Application state: the shared question catalog, live attempts, and the submission sink.
//!
//! This module owns:
//!   - the read-only catalog (from TOML or built-in seeds)
//!   - live attempts keyed by attempt id, each with its own `SessionState`
//!   - the sink that finished attempts are handed to
//!
//! Every mutation of an attempt runs inside one write-lock critical section,
//! so an event always sees and replaces a single consistent snapshot.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::{load_app_config_from_env, AppConfig, SubmissionCfg};
use crate::domain::Identity;
use crate::error::{AttemptError, CatalogError};
use crate::seeds::seed_questions;
use crate::session::SessionState;
use crate::submission::{sink_from_config, SubmissionPayload, SubmissionSink};

/// One respondent's run through the catalog.
#[derive(Clone, Debug)]
pub struct Attempt {
    pub identity: Identity,
    pub session: SessionState,
    pub started_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub attempts: Arc<RwLock<HashMap<Uuid, Attempt>>>,
    pub sink: Arc<dyn SubmissionSink>,
}

impl AppState {
    /// Build state from env: load config, validate the catalog, pick the sink.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, CatalogError> {
        Self::from_config(load_app_config_from_env().unwrap_or_default())
    }

    /// Build state from a parsed config.
    ///
    /// A configured catalog that fails validation is logged and the whole config
    /// is dropped: seeds for the catalog and the log sink for submissions.
    pub fn from_config(cfg: AppConfig) -> Result<Self, CatalogError> {
        let (catalog, submission) = if cfg.questions.is_empty() {
            info!(target: "shade_assessment", "No configured questions; using built-in catalog");
            (Catalog::new(seed_questions())?, cfg.submission)
        } else {
            match Catalog::new(cfg.questions) {
                Ok(c) => (c, cfg.submission),
                Err(e) => {
                    error!(target: "shade_assessment", error = %e, "Invalid configured catalog; using built-in catalog and log sink");
                    (Catalog::new(seed_questions())?, SubmissionCfg::default())
                }
            }
        };

        let sink = sink_from_config(&submission);
        info!(target: "shade_assessment", questions = catalog.len(), sink = sink.name(), "Assessment state ready");
        Ok(Self::with_parts(catalog, sink))
    }

    pub fn with_parts(catalog: Catalog, sink: Arc<dyn SubmissionSink>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            attempts: Arc::new(RwLock::new(HashMap::new())),
            sink,
        }
    }

    /// Seeded catalog with the default sink; handy for tests and demos.
    pub fn with_defaults() -> Result<Self, CatalogError> {
        let catalog = Catalog::new(seed_questions())?;
        Ok(Self::with_parts(catalog, sink_from_config(&SubmissionCfg::default())))
    }

    /// Start an attempt. Name and age must both be present.
    #[instrument(level = "info", skip(self, name), fields(has_name = name.is_some(), has_age = age.is_some()))]
    pub async fn start_attempt(&self, name: Option<&str>, age: Option<u32>) -> Result<(Uuid, Attempt), AttemptError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty()).ok_or(AttemptError::MissingIdentity("name"))?;
        let age = age.filter(|a| *a > 0).ok_or(AttemptError::MissingIdentity("age"))?;

        let session = SessionState::new(&self.catalog, &mut rand::thread_rng());
        let attempt = Attempt {
            identity: Identity { name: name.to_string(), age },
            session,
            started_at: Utc::now(),
        };
        let id = Uuid::new_v4();
        self.attempts.write().await.insert(id, attempt.clone());
        info!(target: "attempt", attempt_id = %id, total = self.catalog.len(), "Attempt started");
        Ok((id, attempt))
    }

    /// Read-only access to a live attempt.
    pub async fn read_attempt<T>(&self, id: Uuid, f: impl FnOnce(&Attempt, &Catalog) -> T) -> Result<T, AttemptError> {
        let attempts = self.attempts.read().await;
        let attempt = attempts.get(&id).ok_or(AttemptError::UnknownAttempt(id))?;
        Ok(f(attempt, &*self.catalog))
    }

    /// Atomic read-modify-write on a live attempt.
    pub async fn update_attempt<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Attempt, &Catalog) -> T,
    ) -> Result<T, AttemptError> {
        let mut attempts = self.attempts.write().await;
        let attempt = attempts.get_mut(&id).ok_or(AttemptError::UnknownAttempt(id))?;
        Ok(f(attempt, &*self.catalog))
    }

    /// Hand the finished attempt to the sink.
    ///
    /// The attempt is detached while the sink runs so no event can change it
    /// mid-submit. On success it is discarded; on failure it is restored and the
    /// sink error is returned unchanged.
    #[instrument(level = "info", skip(self), fields(%id))]
    pub async fn submit(&self, id: Uuid) -> Result<SubmissionPayload, AttemptError> {
        let attempt = self
            .attempts
            .write()
            .await
            .remove(&id)
            .ok_or(AttemptError::UnknownAttempt(id))?;

        let payload = SubmissionPayload::new(&attempt.identity, &attempt.session, Utc::now());
        match self.sink.submit(&payload).await {
            Ok(()) => {
                info!(target: "attempt", attempt_id = %id, sink = self.sink.name(), answered = payload.answers.len(), "Attempt submitted");
                Ok(payload)
            }
            Err(e) => {
                warn!(target: "attempt", attempt_id = %id, sink = self.sink.name(), error = %e, "Submission failed; attempt kept");
                self.attempts.write().await.insert(id, attempt);
                Err(e.into())
            }
        }
    }

    /// Discard an attempt without submitting.
    #[instrument(level = "info", skip(self), fields(%id))]
    pub async fn abandon(&self, id: Uuid) -> Result<(), AttemptError> {
        self.attempts
            .write()
            .await
            .remove(&id)
            .map(|_| info!(target: "attempt", attempt_id = %id, "Attempt abandoned"))
            .ok_or(AttemptError::UnknownAttempt(id))
    }

    pub async fn live_attempts(&self) -> usize {
        self.attempts.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_app_config;
    use crate::error::SinkError;
    use async_trait::async_trait;

    struct RejectingSink;

    #[async_trait]
    impl SubmissionSink for RejectingSink {
        fn name(&self) -> &'static str {
            "rejecting"
        }
        async fn submit(&self, _payload: &SubmissionPayload) -> Result<(), SinkError> {
            Err(SinkError::Rejected("offline".into()))
        }
    }

    #[tokio::test]
    async fn start_requires_identity() {
        let state = AppState::with_defaults().unwrap();
        assert!(matches!(
            state.start_attempt(None, Some(30)).await,
            Err(AttemptError::MissingIdentity("name"))
        ));
        assert!(matches!(
            state.start_attempt(Some("  "), Some(30)).await,
            Err(AttemptError::MissingIdentity("name"))
        ));
        assert!(matches!(
            state.start_attempt(Some("Ada"), None).await,
            Err(AttemptError::MissingIdentity("age"))
        ));
        assert_eq!(state.live_attempts().await, 0);
    }

    #[tokio::test]
    async fn submit_discards_attempt() {
        let state = AppState::with_defaults().unwrap();
        let (id, _) = state.start_attempt(Some("Ada"), Some(30)).await.unwrap();
        let payload = state.submit(id).await.unwrap();
        assert!(payload.answers.is_empty());
        assert_eq!(payload.total_questions, state.catalog.len());
        assert_eq!(payload.name, "Ada");
        assert!(matches!(state.submit(id).await, Err(AttemptError::UnknownAttempt(_))));
    }

    #[tokio::test]
    async fn failed_submit_keeps_attempt() {
        let catalog = Catalog::new(seed_questions()).unwrap();
        let state = AppState::with_parts(catalog, Arc::new(RejectingSink));
        let (id, _) = state.start_attempt(Some("Ada"), Some(30)).await.unwrap();

        let err = state.submit(id).await.unwrap_err();
        assert!(matches!(err, AttemptError::Submission(SinkError::Rejected(_))));
        assert_eq!(state.live_attempts().await, 1);
        assert!(state.read_attempt(id, |a, _| a.identity.age).await.is_ok());
    }

    #[tokio::test]
    async fn abandon_removes_attempt() {
        let state = AppState::with_defaults().unwrap();
        let (id, _) = state.start_attempt(Some("Ada"), Some(30)).await.unwrap();
        state.abandon(id).await.unwrap();
        assert!(matches!(state.abandon(id).await, Err(AttemptError::UnknownAttempt(_))));
    }

    #[test]
    fn invalid_catalog_drops_configured_sink() {
        let cfg = parse_app_config(
            r#"
            [submission]
            sink = "json_lines"
            path = "elsewhere.jsonl"

            [[questions]]
            id = 0
            prompt = "zero"
            kind = "order_by_lightness"
            "#,
        )
        .unwrap();
        let state = AppState::from_config(cfg).unwrap();
        assert_eq!(state.catalog.len(), seed_questions().len());
        assert_eq!(state.sink.name(), "log");
    }

    #[test]
    fn valid_catalog_keeps_configured_sink() {
        let cfg = parse_app_config(
            r#"
            [submission]
            sink = "json_lines"

            [[questions]]
            id = 4
            prompt = "pick"
            kind = "select_target"
            options = ["red", "blue"]
            "#,
        )
        .unwrap();
        let state = AppState::from_config(cfg).unwrap();
        assert_eq!(state.catalog.len(), 1);
        assert_eq!(state.sink.name(), "json_lines");
    }
}
