//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; failures map to a JSON `{ "error": ... }` body.

use std::sync::Arc;
use axum::{
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{HostError, QuizError};
use crate::logic;
use crate::protocol::*;
use crate::state::AppState;

impl IntoResponse for HostError {
  fn into_response(self) -> Response {
    let status = match &self {
      HostError::InvalidQuestionCount { .. } | HostError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
      HostError::UnknownSession(_) => StatusCode::NOT_FOUND,
      HostError::Quiz(QuizError::UnknownOption(_)) => StatusCode::UNPROCESSABLE_ENTITY,
      HostError::Quiz(QuizError::NoQuestions) => StatusCode::BAD_REQUEST,
      HostError::Quiz(_) => StatusCode::CONFLICT,
    };
    warn!(target: "quiz", %status, error = %self, "Request rejected");
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(SettingsOut::from(&state.settings))
}

#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<(StatusCode, Json<SessionView>), HostError> {
  let body = parse_start(&body)?;
  let view = logic::start_session(&state, body.question_count).await?;
  info!(target: "quiz", id = %view.session_id, total = view.total, "HTTP session started");
  Ok((StatusCode::CREATED, Json(view)))
}

/// An empty body means "use the defaults"; anything else must be a valid `StartIn`.
fn parse_start(body: &[u8]) -> Result<StartIn, HostError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(StartIn::default());
  }
  serde_json::from_slice(body).map_err(|e| HostError::InvalidRequest(e.to_string()))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, HostError> {
  Ok(Json(logic::get_session(&state, id).await?))
}

#[instrument(level = "info", skip(state, body), fields(option_len = body.option.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<SessionView>, HostError> {
  let view = logic::submit_answer(&state, id, &body.option).await?;
  info!(
    target: "quiz",
    %id,
    correct = ?view.feedback.as_ref().map(|f| f.is_correct),
    score = view.score,
    "HTTP answer evaluated"
  );
  Ok(Json(view))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_advance(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, HostError> {
  Ok(Json(logic::advance(&state, id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_restart(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionView>), HostError> {
  let view = logic::restart(&state, id).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, HostError> {
  logic::end_session(&state, id).await?;
  Ok(StatusCode::NO_CONTENT)
}
