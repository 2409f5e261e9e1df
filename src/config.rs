//! Loading quiz settings from TOML (`QUIZ_CONFIG_PATH`) and the environment.
//!
//! Expected schema:
//!
//! ```toml
//! [quiz]
//! default_questions = 50
//! min_questions = 1
//! max_questions = 500
//! feedback_delay_ms = 2000
//! distractor_attempts = 500
//! max_sessions = 10000       # HTTP session store capacity
//! session_idle_secs = 3600   # idle HTTP sessions are dropped after this
//! seed = 1234          # optional, makes question generation reproducible
//! ```

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::question::DEFAULT_DISTRACTOR_ATTEMPTS;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub quiz: QuizSettings,
}

/// Host-side quiz settings. The core never validates these; the host does.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuizSettings {
  pub default_questions: usize,
  pub min_questions: usize,
  pub max_questions: usize,
  /// Pause between answer feedback and the automatic advance.
  pub feedback_delay_ms: u64,
  pub distractor_attempts: usize,
  pub max_sessions: usize,
  pub session_idle_secs: u64,
  pub seed: Option<u64>,
}

impl Default for QuizSettings {
  fn default() -> Self {
    Self {
      default_questions: 50,
      min_questions: 1,
      max_questions: 500,
      feedback_delay_ms: 2000,
      distractor_attempts: DEFAULT_DISTRACTOR_ATTEMPTS,
      max_sessions: 10_000,
      session_idle_secs: 3600,
      seed: None,
    }
  }
}

impl QuizSettings {
  /// Clamp inconsistent bounds back to something playable.
  fn sanitized(mut self) -> Self {
    if self.min_questions == 0 {
      warn!(target: "kana_quiz", "min_questions must be at least 1; using 1");
      self.min_questions = 1;
    }
    if self.max_questions < self.min_questions {
      warn!(target: "kana_quiz", min = self.min_questions, max = self.max_questions, "max_questions below min_questions; using min");
      self.max_questions = self.min_questions;
    }
    self.default_questions = self.default_questions.clamp(self.min_questions, self.max_questions);
    if self.max_sessions == 0 {
      warn!(target: "kana_quiz", "max_sessions must be at least 1; using 1");
      self.max_sessions = 1;
    }
    self
  }
}

/// Parse a TOML document into settings.
pub fn parse_settings(src: &str) -> Result<QuizSettings, toml::de::Error> {
  toml::from_str::<AppConfig>(src).map(|cfg| cfg.quiz.sanitized())
}

/// Load settings from QUIZ_CONFIG_PATH (falls back to defaults on any IO/parse
/// error), then apply the QUIZ_SEED override.
pub fn load_settings_from_env() -> QuizSettings {
  let mut settings = match std::env::var("QUIZ_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match parse_settings(&s) {
        Ok(settings) => {
          info!(target: "kana_quiz", %path, "Loaded quiz config (TOML)");
          settings
        }
        Err(e) => {
          error!(target: "kana_quiz", %path, error = %e, "Failed to parse TOML config");
          QuizSettings::default()
        }
      },
      Err(e) => {
        error!(target: "kana_quiz", %path, error = %e, "Failed to read TOML config file");
        QuizSettings::default()
      }
    },
    Err(_) => QuizSettings::default(),
  };

  if let Ok(raw) = std::env::var("QUIZ_SEED") {
    match raw.parse::<u64>() {
      Ok(seed) => settings.seed = Some(seed),
      Err(e) => error!(target: "kana_quiz", %raw, error = %e, "Ignoring invalid QUIZ_SEED"),
    }
  }
  settings
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_uses_defaults() {
    assert_eq!(parse_settings("").unwrap(), QuizSettings::default());
  }

  #[test]
  fn partial_quiz_table_keeps_other_defaults() {
    let s = parse_settings("[quiz]\nfeedback_delay_ms = 500\nseed = 9\n").unwrap();
    assert_eq!(s.feedback_delay_ms, 500);
    assert_eq!(s.seed, Some(9));
    assert_eq!(s.max_questions, 500);
    assert_eq!(s.default_questions, 50);
  }

  #[test]
  fn inconsistent_bounds_are_sanitized() {
    let s = parse_settings("[quiz]\nmin_questions = 0\nmax_questions = 10\ndefault_questions = 40\n").unwrap();
    assert_eq!(s.min_questions, 1);
    assert_eq!(s.max_questions, 10);
    assert_eq!(s.default_questions, 10);
  }

  #[test]
  fn session_store_limits_are_configurable() {
    let s = parse_settings("[quiz]\nmax_sessions = 0\nsession_idle_secs = 60\n").unwrap();
    assert_eq!(s.max_sessions, 1);
    assert_eq!(s.session_idle_secs, 60);
    assert_eq!(QuizSettings::default().max_sessions, 10_000);
  }

  #[test]
  fn malformed_toml_is_an_error() {
    assert!(parse_settings("[quiz\nmax_questions = ").is_err());
  }
}
