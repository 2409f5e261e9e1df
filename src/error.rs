//! Error types for the quiz core and its host.

use std::fmt;

use uuid::Uuid;

/// Invalid-state errors raised by [`crate::session::QuizSession`].
///
/// These signal a broken call sequence in the host; the session is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
  /// A session must contain at least one question.
  NoQuestions,
  /// The current question already has a submitted answer.
  AlreadyAnswered,
  /// `advance` was called before the current question was answered.
  NotAnswered,
  /// Every question has been played.
  SessionCompleted,
  /// The submitted text is not one of the current options.
  UnknownOption(String),
}

impl fmt::Display for QuizError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QuizError::NoQuestions => write!(f, "a quiz session needs at least one question"),
      QuizError::AlreadyAnswered => write!(f, "the current question has already been answered"),
      QuizError::NotAnswered => write!(f, "cannot advance before answering the current question"),
      QuizError::SessionCompleted => write!(f, "the quiz session is already completed"),
      QuizError::UnknownOption(opt) => write!(f, "'{opt}' is not an option for the current question"),
    }
  }
}

impl std::error::Error for QuizError {}

/// Rejected catalog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
  /// No glyphs to ask about.
  Empty,
  /// Fewer distinct romanizations than options per question.
  PoolTooSmall { distinct: usize, required: usize },
}

impl fmt::Display for CatalogError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CatalogError::Empty => write!(f, "catalog has no entries"),
      CatalogError::PoolTooSmall { distinct, required } => write!(
        f,
        "catalog has {distinct} distinct romanizations, at least {required} are required"
      ),
    }
  }
}

impl std::error::Error for CatalogError {}

/// Errors surfaced by the host layer (HTTP/WebSocket) around the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
  /// Requested question count is outside the configured range.
  InvalidQuestionCount { requested: usize, min: usize, max: usize },
  /// Request body could not be decoded into the expected shape.
  InvalidRequest(String),
  UnknownSession(Uuid),
  Quiz(QuizError),
}

impl fmt::Display for HostError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      HostError::InvalidQuestionCount { requested, min, max } => write!(
        f,
        "question count {requested} is out of range (expected {min}..={max})"
      ),
      HostError::InvalidRequest(msg) => write!(f, "invalid request body: {msg}"),
      HostError::UnknownSession(id) => write!(f, "unknown session: {id}"),
      HostError::Quiz(e) => write!(f, "{e}"),
    }
  }
}

impl std::error::Error for HostError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      HostError::Quiz(e) => Some(e),
      _ => None,
    }
  }
}

impl From<QuizError> for HostError {
  fn from(e: QuizError) -> Self {
    HostError::Quiz(e)
  }
}
