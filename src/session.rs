//! Quiz session state machine.
//!
//! A session is generated in full at start, then driven by two transitions:
//!   - `submit_answer`: AwaitingAnswer -> Answered (scores the choice)
//!   - `advance`:       Answered -> AwaitingAnswer on the next question, or Completed
//!
//! Restarting means building a new session; nothing here resets in place.

use rand::Rng;
use tracing::{debug, info};

use crate::catalog::KanaCatalog;
use crate::error::QuizError;
use crate::question::{generate_question, Question, DEFAULT_DISTRACTOR_ATTEMPTS};

/// What the learner chose, next to what was right.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
  pub chosen: String,
  pub correct: String,
}

impl AnswerFeedback {
  pub fn is_correct(&self) -> bool {
    self.chosen == self.correct
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
  AwaitingAnswer,
  Answered,
  Completed,
}

/// Result of [`QuizSession::current_question`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurrentQuestion<'a> {
  Question(&'a Question),
  Completed,
}

/// Final score screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
  pub score: i64,
  pub total: usize,
}

#[derive(Clone, Debug)]
pub struct QuizSession {
  questions: Vec<Question>,
  current_index: usize,
  score: i64,
  last_result: Option<AnswerFeedback>,
}

impl QuizSession {
  /// Generate `total_questions` questions and position on the first one.
  pub fn start<R: Rng + ?Sized>(
    catalog: &KanaCatalog,
    total_questions: usize,
    rng: &mut R,
  ) -> Result<Self, QuizError> {
    Self::start_with_attempts(catalog, total_questions, DEFAULT_DISTRACTOR_ATTEMPTS, rng)
  }

  pub fn start_with_attempts<R: Rng + ?Sized>(
    catalog: &KanaCatalog,
    total_questions: usize,
    distractor_attempts: usize,
    rng: &mut R,
  ) -> Result<Self, QuizError> {
    if total_questions == 0 {
      return Err(QuizError::NoQuestions);
    }
    let questions = (0..total_questions)
      .map(|_| generate_question(catalog, rng, distractor_attempts))
      .collect::<Vec<_>>();
    info!(target: "quiz", total = total_questions, "Quiz session started");
    Ok(Self { questions, current_index: 0, score: 0, last_result: None })
  }

  pub fn current_question(&self) -> CurrentQuestion<'_> {
    match self.questions.get(self.current_index) {
      Some(q) => CurrentQuestion::Question(q),
      None => CurrentQuestion::Completed,
    }
  }

  /// Score the selected option against the current question.
  ///
  /// Correct answers add one point, anything else takes one away; the score
  /// has no floor. The index does not move until [`QuizSession::advance`].
  pub fn submit_answer(&mut self, option_text: &str) -> Result<AnswerFeedback, QuizError> {
    let question = match self.current_question() {
      CurrentQuestion::Question(q) => q,
      CurrentQuestion::Completed => return Err(QuizError::SessionCompleted),
    };
    if self.last_result.is_some() {
      return Err(QuizError::AlreadyAnswered);
    }
    let chosen_index = question
      .option_index(option_text)
      .ok_or_else(|| QuizError::UnknownOption(option_text.to_string()))?;

    let is_correct = chosen_index == question.correct_index;
    let feedback = AnswerFeedback {
      chosen: option_text.to_string(),
      correct: question.correct_option().to_string(),
    };
    if is_correct {
      self.score += 1;
    } else {
      self.score -= 1;
    }
    debug!(
      target: "quiz",
      index = self.current_index,
      chosen = %feedback.chosen,
      correct = %feedback.correct,
      score = self.score,
      "Answer submitted"
    );
    self.last_result = Some(feedback.clone());
    Ok(feedback)
  }

  /// Move past an answered question.
  pub fn advance(&mut self) -> Result<(), QuizError> {
    if self.is_completed() {
      return Err(QuizError::SessionCompleted);
    }
    if self.last_result.is_none() {
      return Err(QuizError::NotAnswered);
    }
    self.current_index += 1;
    self.last_result = None;
    if self.is_completed() {
      info!(target: "quiz", score = self.score, total = self.total_questions(), "Quiz session completed");
    }
    Ok(())
  }

  pub fn phase(&self) -> SessionPhase {
    if self.is_completed() {
      SessionPhase::Completed
    } else if self.last_result.is_some() {
      SessionPhase::Answered
    } else {
      SessionPhase::AwaitingAnswer
    }
  }

  pub fn is_completed(&self) -> bool {
    self.current_index >= self.questions.len()
  }

  pub fn summary(&self) -> Option<SessionSummary> {
    self
      .is_completed()
      .then(|| SessionSummary { score: self.score, total: self.total_questions() })
  }

  pub fn score(&self) -> i64 {
    self.score
  }

  pub fn current_index(&self) -> usize {
    self.current_index
  }

  pub fn total_questions(&self) -> usize {
    self.questions.len()
  }

  pub fn answered(&self) -> bool {
    self.last_result.is_some()
  }

  pub fn last_result(&self) -> Option<&AnswerFeedback> {
    self.last_result.as_ref()
  }

  pub fn questions(&self) -> &[Question] {
    &self.questions
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashSet;

  fn session(n: usize) -> QuizSession {
    let catalog = KanaCatalog::load();
    QuizSession::start(&catalog, n, &mut StdRng::seed_from_u64(17)).expect("session")
  }

  fn current(s: &QuizSession) -> Question {
    match s.current_question() {
      CurrentQuestion::Question(q) => q.clone(),
      CurrentQuestion::Completed => panic!("session already completed"),
    }
  }

  fn wrong_option(q: &Question) -> String {
    q.options
      .iter()
      .find(|o| o.as_str() != q.correct_option())
      .cloned()
      .expect("a distractor")
  }

  #[test]
  fn start_generates_requested_number_of_questions() {
    let s = session(25);
    assert_eq!(s.total_questions(), 25);
    assert_eq!(s.questions().len(), 25);
    assert_eq!(s.current_index(), 0);
    assert_eq!(s.score(), 0);
    assert!(!s.answered());
    assert!(s.last_result().is_none());
    assert_eq!(s.phase(), SessionPhase::AwaitingAnswer);
  }

  #[test]
  fn start_rejects_zero_questions() {
    let catalog = KanaCatalog::load();
    let err = QuizSession::start(&catalog, 0, &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert_eq!(err, QuizError::NoQuestions);
  }

  #[test]
  fn question_ids_are_unique_within_a_session() {
    let s = session(500);
    let ids: HashSet<_> = s.questions().iter().map(|q| q.id).collect();
    assert_eq!(ids.len(), 500);
  }

  #[test]
  fn score_has_no_floor() {
    let mut s = session(3);
    let q = current(&s);
    s.submit_answer(q.correct_option()).unwrap();
    assert_eq!(s.score(), 1);
    s.advance().unwrap();

    let q = current(&s);
    s.submit_answer(&wrong_option(&q)).unwrap();
    assert_eq!(s.score(), 0);
    s.advance().unwrap();

    let q = current(&s);
    s.submit_answer(&wrong_option(&q)).unwrap();
    assert_eq!(s.score(), -1);
  }

  #[test]
  fn advancing_n_times_completes() {
    let mut s = session(4);
    for _ in 0..4 {
      let q = current(&s);
      s.submit_answer(q.correct_option()).unwrap();
      s.advance().unwrap();
    }
    assert!(s.is_completed());
    assert_eq!(s.current_question(), CurrentQuestion::Completed);
    assert_eq!(s.phase(), SessionPhase::Completed);
  }

  #[test]
  fn current_question_is_stable_until_advance() {
    let mut s = session(2);
    let first = current(&s);
    assert_eq!(current(&s), first);
    s.submit_answer(first.correct_option()).unwrap();
    assert_eq!(current(&s), first);
    s.advance().unwrap();
    assert_ne!(current(&s).id, first.id);
  }

  #[test]
  fn advance_before_answer_is_rejected() {
    let mut s = session(2);
    let before = current(&s);
    assert_eq!(s.advance(), Err(QuizError::NotAnswered));
    assert_eq!(s.current_index(), 0);
    assert_eq!(current(&s), before);
  }

  #[test]
  fn double_submit_is_rejected_without_rescoring() {
    let mut s = session(2);
    let q = current(&s);
    s.submit_answer(q.correct_option()).unwrap();
    assert_eq!(s.submit_answer(q.correct_option()), Err(QuizError::AlreadyAnswered));
    assert_eq!(s.score(), 1);
  }

  #[test]
  fn unknown_option_leaves_state_untouched() {
    let mut s = session(1);
    let err = s.submit_answer("not-a-kana").unwrap_err();
    assert_eq!(err, QuizError::UnknownOption("not-a-kana".into()));
    assert_eq!(s.score(), 0);
    assert!(!s.answered());
  }

  #[test]
  fn feedback_reports_choice_and_answer() {
    let mut s = session(1);
    let q = current(&s);
    let wrong = wrong_option(&q);
    let fb = s.submit_answer(&wrong).unwrap();
    assert_eq!(fb.chosen, wrong);
    assert_eq!(fb.correct, q.correct_option());
    assert!(!fb.is_correct());
    assert_eq!(s.last_result(), Some(&fb));
    assert_eq!(s.phase(), SessionPhase::Answered);
    s.advance().unwrap();
    assert!(s.last_result().is_none());
  }

  #[test]
  fn three_question_walkthrough() {
    let mut s = session(3);
    for correct in [true, true, false] {
      let q = current(&s);
      let pick = if correct { q.correct_option().to_string() } else { wrong_option(&q) };
      s.submit_answer(&pick).unwrap();
      s.advance().unwrap();
    }
    assert_eq!(s.score(), 1);
    assert_eq!(s.current_index(), 3);
    assert!(s.is_completed());
    assert_eq!(s.summary(), Some(SessionSummary { score: 1, total: 3 }));
    assert_eq!(s.submit_answer("a"), Err(QuizError::SessionCompleted));
    assert_eq!(s.advance(), Err(QuizError::SessionCompleted));
  }
}
