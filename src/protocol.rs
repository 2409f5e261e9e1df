//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::QuizSettings;
use crate::question::Question;
use crate::session::{AnswerFeedback, CurrentQuestion, QuizSession};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    StartQuiz {
        #[serde(default, rename = "questionCount")]
        question_count: Option<usize>,
    },
    SubmitAnswer {
        option: String,
    },
    Advance,
    Restart,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question {
        index: usize,
        total: usize,
        score: i64,
        question: QuestionOut,
    },
    Feedback {
        chosen: String,
        correct: String,
        #[serde(rename = "isCorrect")]
        is_correct: bool,
        score: i64,
    },
    Completed {
        score: i64,
        total: usize,
    },
    Error {
        message: String,
    },
}

/// Question as shown to the learner: the answer key stays on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionOut {
    pub id: Uuid,
    pub prompt: String,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionOut {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt.clone(),
            options: q.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackOut {
    pub chosen: String,
    pub correct: String,
    pub is_correct: bool,
}

impl From<&AnswerFeedback> for FeedbackOut {
    fn from(fb: &AnswerFeedback) -> Self {
        Self {
            chosen: fb.chosen.clone(),
            correct: fb.correct.clone(),
            is_correct: fb.is_correct(),
        }
    }
}

/// Next message to push for a session: the current question, or the final score.
pub fn question_message(session: &QuizSession) -> ServerWsMessage {
    match session.current_question() {
        CurrentQuestion::Question(q) => ServerWsMessage::Question {
            index: session.current_index(),
            total: session.total_questions(),
            score: session.score(),
            question: q.into(),
        },
        CurrentQuestion::Completed => ServerWsMessage::Completed {
            score: session.score(),
            total: session.total_questions(),
        },
    }
}

pub fn feedback_message(feedback: &AnswerFeedback, score: i64) -> ServerWsMessage {
    ServerWsMessage::Feedback {
        chosen: feedback.chosen.clone(),
        correct: feedback.correct.clone(),
        is_correct: feedback.is_correct(),
        score,
    }
}

//
// HTTP request/response DTOs
//

/// Everything the host needs to render one session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub index: usize,
    pub total: usize,
    pub score: i64,
    pub answered: bool,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionOut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackOut>,
}

pub fn session_view(session_id: Uuid, session: &QuizSession) -> SessionView {
    let question = match session.current_question() {
        CurrentQuestion::Question(q) => Some(q.into()),
        CurrentQuestion::Completed => None,
    };
    SessionView {
        session_id,
        index: session.current_index(),
        total: session.total_questions(),
        score: session.score(),
        answered: session.answered(),
        completed: session.is_completed(),
        question,
        feedback: session.last_result().map(FeedbackOut::from),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartIn {
    #[serde(default)]
    pub question_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub option: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOut {
    pub min_questions: usize,
    pub max_questions: usize,
    pub default_questions: usize,
    pub feedback_delay_ms: u64,
}

impl From<&QuizSettings> for SettingsOut {
    fn from(s: &QuizSettings) -> Self {
        Self {
            min_questions: s.min_questions,
            max_questions: s.max_questions,
            default_questions: s.default_questions,
            feedback_delay_ms: s.feedback_delay_ms,
        }
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub error: String,
}
