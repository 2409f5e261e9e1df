//! Session operations shared by the HTTP handlers.
//!
//! Each call goes through the session store and returns a fresh `SessionView`
//! so clients can re-render from a single response.

use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::HostError;
use crate::protocol::{session_view, SessionView};
use crate::session::QuizSession;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn start_session(state: &AppState, question_count: Option<usize>) -> Result<SessionView, HostError> {
  let session = state.build_session(question_count)?;
  let total = session.total_questions();
  let id = state.insert_session(session).await;
  info!(target: "quiz", %id, total, "Session created");
  state.with_session_ref(id, |s| session_view(id, s)).await
}

#[instrument(level = "debug", skip(state), fields(%id))]
pub async fn get_session(state: &AppState, id: Uuid) -> Result<SessionView, HostError> {
  state.with_session_ref(id, |s| session_view(id, s)).await
}

#[instrument(level = "info", skip(state, option), fields(%id, option_len = option.len()))]
pub async fn submit_answer(state: &AppState, id: Uuid, option: &str) -> Result<SessionView, HostError> {
  state
    .with_session(id, |s| {
      s.submit_answer(option)?;
      Ok(session_view(id, s))
    })
    .await
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn advance(state: &AppState, id: Uuid) -> Result<SessionView, HostError> {
  state
    .with_session(id, |s| {
      s.advance()?;
      Ok(session_view(id, s))
    })
    .await
}

/// Discard the session and start a new one with the same length.
#[instrument(level = "info", skip(state), fields(%id))]
pub async fn restart(state: &AppState, id: Uuid) -> Result<SessionView, HostError> {
  let total = state.with_session_ref(id, QuizSession::total_questions).await?;
  let fresh = state.build_session(Some(total))?;
  state.remove_session(id).await?;
  let new_id = state.insert_session(fresh).await;
  info!(target: "quiz", old = %id, new = %new_id, total, "Session restarted");
  state.with_session_ref(new_id, |s| session_view(new_id, s)).await
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn end_session(state: &AppState, id: Uuid) -> Result<(), HostError> {
  let session = state.remove_session(id).await?;
  info!(target: "quiz", %id, score = session.score(), completed = session.is_completed(), "Session discarded");
  Ok(())
}
