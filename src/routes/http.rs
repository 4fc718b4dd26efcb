//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs the attempt id and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::arrangement::DragRelease;
use crate::error::AttemptError;
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;
use crate::submission::SubmissionPayload;

impl AttemptError {
  pub fn status(&self) -> StatusCode {
    match self {
      AttemptError::MissingIdentity(_) | AttemptError::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
      AttemptError::UnknownAttempt(_) => StatusCode::NOT_FOUND,
      AttemptError::Submission(_) => StatusCode::BAD_GATEWAY,
    }
  }
}

impl IntoResponse for AttemptError {
  fn into_response(self) -> Response {
    let status = self.status();
    warn!(target: "shade_assessment", %status, error = %self, "Request failed");
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_questions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(QuestionsOut { questions: state.catalog.questions().to_vec() })
}

#[instrument(level = "info", skip(state, body), fields(has_name = body.name.is_some(), has_age = body.age.is_some()))]
pub async fn http_post_attempt(
  State(state): State<Arc<AppState>>,
  Json(body): Json<StartAttemptIn>,
) -> Result<(StatusCode, Json<AttemptOut>), AttemptError> {
  let out = logic::start_attempt(&state, body.name.as_deref(), body.age).await?;
  info!(target: "attempt", attempt_id = %out.attempt_id, "HTTP attempt started");
  Ok((StatusCode::CREATED, Json(out)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_attempt(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<QuestionView>, AttemptError> {
  Ok(Json(logic::current_question(&state, id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_attempt(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, AttemptError> {
  logic::abandon(&state, id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state, body), fields(active = %body.active_id, over = ?body.over_id))]
pub async fn http_post_drag(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<DragRelease>,
) -> Result<Json<DragOut>, AttemptError> {
  Ok(Json(logic::drag_release(&state, id, &body).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_navigate(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NavigateIn>,
) -> Result<Json<QuestionView>, AttemptError> {
  Ok(Json(logic::navigate(&state, id, body).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_pagination(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Query(q): Query<PaginationQuery>,
) -> Result<Json<PaginationOut>, AttemptError> {
  Ok(Json(logic::pagination(&state, id, q).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_submit(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SubmissionPayload>, AttemptError> {
  Ok(Json(logic::submit(&state, id).await?))
}
