//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Starting, submitting and abandoning attempts
//!   - Rendering the current question
//!   - Applying drag releases to the current question
//!   - Navigation and the pagination window

use tracing::{info, instrument};
use uuid::Uuid;

use crate::arrangement::{on_drag_release, DragRelease};
use crate::catalog::Catalog;
use crate::error::AttemptError;
use crate::pagination;
use crate::protocol::{AttemptOut, DragOut, NavigateIn, PaginationOut, PaginationQuery, QuestionView};
use crate::state::{AppState, Attempt};
use crate::submission::SubmissionPayload;

fn current_view(attempt: &Attempt, catalog: &Catalog) -> Result<QuestionView, AttemptError> {
  QuestionView::current(attempt, catalog).ok_or(AttemptError::IndexOutOfRange {
    index: attempt.session.current_index(),
    total: catalog.len(),
  })
}

#[instrument(level = "info", skip(state, name), fields(has_name = name.is_some()))]
pub async fn start_attempt(state: &AppState, name: Option<&str>, age: Option<u32>) -> Result<AttemptOut, AttemptError> {
  let (attempt_id, attempt) = state.start_attempt(name, age).await?;
  let question = current_view(&attempt, &state.catalog)?;
  Ok(AttemptOut { attempt_id, total_questions: state.catalog.len(), question })
}

#[instrument(level = "debug", skip(state))]
pub async fn current_question(state: &AppState, attempt_id: Uuid) -> Result<QuestionView, AttemptError> {
  state.read_attempt(attempt_id, current_view).await?
}

/// Apply a drag release to the attempt's current question and return the updated view.
#[instrument(level = "info", skip(state, event), fields(%attempt_id, active = %event.active_id, over = ?event.over_id))]
pub async fn drag_release(state: &AppState, attempt_id: Uuid, event: &DragRelease) -> Result<DragOut, AttemptError> {
  state
    .update_attempt(attempt_id, |attempt, catalog| -> Result<DragOut, AttemptError> {
      let index = attempt.session.current_index();
      let question = catalog
        .get(index)
        .ok_or(AttemptError::IndexOutOfRange { index, total: catalog.len() })?;
      let outcome = on_drag_release(&mut attempt.session, question, event);
      let question = current_view(attempt, catalog)?;
      Ok(DragOut { outcome, question })
    })
    .await?
}

#[instrument(level = "debug", skip(state))]
pub async fn navigate(state: &AppState, attempt_id: Uuid, target: NavigateIn) -> Result<QuestionView, AttemptError> {
  state
    .update_attempt(attempt_id, |attempt, catalog| -> Result<QuestionView, AttemptError> {
      match target {
        NavigateIn::Next => { attempt.session.next(); }
        NavigateIn::Prev => { attempt.session.prev(); }
        NavigateIn::Jump { index } => { attempt.session.jump(index)?; }
      }
      current_view(attempt, catalog)
    })
    .await?
}

/// Pagination window around the current question. Read-only.
#[instrument(level = "debug", skip(state))]
pub async fn pagination(state: &AppState, attempt_id: Uuid, query: PaginationQuery) -> Result<PaginationOut, AttemptError> {
  let size_class = query.size_class();
  state
    .read_attempt(attempt_id, |attempt, _| {
      let total = attempt.session.total();
      let current = attempt.session.current_index() + 1;
      PaginationOut { size_class, current, total, entries: pagination::window(total, current, size_class) }
    })
    .await
}

pub async fn submit(state: &AppState, attempt_id: Uuid) -> Result<SubmissionPayload, AttemptError> {
  let payload = state.submit(attempt_id).await?;
  info!(target: "attempt", %attempt_id, answered = payload.answers.len(), total = payload.total_questions, "Assessment submitted");
  Ok(payload)
}

pub async fn abandon(state: &AppState, attempt_id: Uuid) -> Result<(), AttemptError> {
  state.abandon(attempt_id).await
}
