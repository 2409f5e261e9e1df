//! WebSocket upgrade + message loop. Each connection owns one quiz session.
//!
//! After an answer the loop arms an auto-advance timer (`feedback_delay_ms`);
//! when it fires the next question (or the final score) is pushed without a
//! client request. The timer is raced against incoming messages, never awaited
//! on its own, so the connection stays responsive during the pause.

use std::{pin::Pin, sync::Arc, time::Duration};
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::time::{sleep, Sleep};
use tracing::{debug, error, info, instrument};

use crate::protocol::{feedback_message, question_message, ClientWsMessage, ServerWsMessage};
use crate::session::QuizSession;
use crate::state::AppState;

type AutoAdvance = Option<Pin<Box<Sleep>>>;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "kana_quiz", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "kana_quiz", "WebSocket connected");
  let mut session: Option<QuizSession> = None;
  let mut auto_advance: AutoAdvance = None;

  loop {
    let replies = tokio::select! {
      incoming = socket.recv() => {
        let Some(Ok(msg)) = incoming else { break };
        match msg {
          Message::Text(txt) => match serde_json::from_str::<ClientWsMessage>(&txt) {
            Ok(incoming) => {
              debug!(target: "kana_quiz", "WS received: {:?}", &incoming);
              handle_client_ws(incoming, &state, &mut session, &mut auto_advance)
            }
            Err(e) => vec![ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }],
          },
          Message::Ping(payload) => {
            let _ = socket.send(Message::Pong(payload)).await;
            continue;
          }
          Message::Close(_) => break,
          _ => continue,
        }
      }
      _ = fire(&mut auto_advance) => {
        auto_advance = None;
        auto_advance_step(&mut session)
      }
    };

    for reply in replies {
      let out = serde_json::to_string(&reply).unwrap_or_else(|e| {
        serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
      });
      if let Err(e) = socket.send(Message::Text(out)).await {
        error!(target: "kana_quiz", error = %e, "WS send error");
        info!(target: "kana_quiz", "WebSocket disconnected");
        return;
      }
    }
  }
  info!(target: "kana_quiz", "WebSocket disconnected");
}

/// Resolves when the armed timer elapses; pending forever when none is armed.
async fn fire(timer: &mut AutoAdvance) {
  match timer {
    Some(t) => t.as_mut().await,
    None => std::future::pending().await,
  }
}

fn auto_advance_step(session: &mut Option<QuizSession>) -> Vec<ServerWsMessage> {
  let Some(s) = session.as_mut() else { return Vec::new() };
  match s.advance() {
    Ok(()) => {
      debug!(target: "quiz", index = s.current_index(), "Auto-advanced");
      vec![question_message(s)]
    }
    // a manual advance already moved on
    Err(_) => Vec::new(),
  }
}

fn handle_client_ws(
  msg: ClientWsMessage,
  state: &AppState,
  session: &mut Option<QuizSession>,
  auto_advance: &mut AutoAdvance,
) -> Vec<ServerWsMessage> {
  match msg {
    ClientWsMessage::Ping => vec![ServerWsMessage::Pong],

    ClientWsMessage::StartQuiz { question_count } => {
      *auto_advance = None;
      replace_session(state, session, question_count)
    }

    ClientWsMessage::Restart => {
      *auto_advance = None;
      let total = session.as_ref().map(QuizSession::total_questions);
      replace_session(state, session, total)
    }

    ClientWsMessage::SubmitAnswer { option } => {
      let Some(s) = session.as_mut() else { return vec![no_session()] };
      match s.submit_answer(&option) {
        Ok(feedback) => {
          info!(target: "quiz", index = s.current_index(), correct = feedback.is_correct(), score = s.score(), "WS submit_answer evaluated");
          *auto_advance = Some(Box::pin(sleep(Duration::from_millis(state.settings.feedback_delay_ms))));
          vec![feedback_message(&feedback, s.score())]
        }
        Err(e) => vec![ServerWsMessage::Error { message: e.to_string() }],
      }
    }

    ClientWsMessage::Advance => {
      let Some(s) = session.as_mut() else { return vec![no_session()] };
      match s.advance() {
        Ok(()) => {
          *auto_advance = None;
          vec![question_message(s)]
        }
        Err(e) => vec![ServerWsMessage::Error { message: e.to_string() }],
      }
    }
  }
}

/// Discard the current session (if any) and start a new one.
fn replace_session(state: &AppState, session: &mut Option<QuizSession>, question_count: Option<usize>) -> Vec<ServerWsMessage> {
  match state.build_session(question_count) {
    Ok(fresh) => {
      info!(target: "quiz", total = fresh.total_questions(), "WS quiz started");
      let first = question_message(&fresh);
      *session = Some(fresh);
      vec![first]
    }
    Err(e) => vec![ServerWsMessage::Error { message: e.to_string() }],
  }
}

fn no_session() -> ServerWsMessage {
  ServerWsMessage::Error { message: "No quiz in progress; send start_quiz first.".into() }
}
