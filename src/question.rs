//! Question generation: pick a kana, draw distractors, shuffle the options.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;
use uuid::{Builder, Uuid};

use crate::catalog::{KanaCatalog, OPTIONS_PER_QUESTION};

/// Default number of pool draws spent looking for distractors.
pub const DEFAULT_DISTRACTOR_ATTEMPTS: usize = 500;

/// One multiple-choice prompt. Immutable once generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
  pub id: Uuid,
  pub prompt: String,
  pub options: Vec<String>,
  pub correct_index: usize,
}

impl Question {
  pub fn correct_option(&self) -> &str {
    &self.options[self.correct_index]
  }

  pub fn option_index(&self, text: &str) -> Option<usize> {
    self.options.iter().position(|o| o == text)
  }
}

/// Build one question from the catalog.
///
/// If the pool cannot supply three distractors within `distractor_attempts` draws
/// the question is returned with fewer options.
pub fn generate_question<R: Rng + ?Sized>(
  catalog: &KanaCatalog,
  rng: &mut R,
  distractor_attempts: usize,
) -> Question {
  let entry = catalog.random_entry(rng);
  let correct = entry.romanization.clone();

  let wanted = OPTIONS_PER_QUESTION - 1;
  let mut options = catalog.random_romanizations(&correct, wanted, distractor_attempts, rng);
  if options.len() < wanted {
    warn!(
      target: "quiz",
      glyph = %entry.glyph,
      found = options.len(),
      wanted,
      attempts = distractor_attempts,
      "Not enough distinct distractors; question has a short option list"
    );
  }

  options.push(correct);
  options.shuffle(rng);
  let correct_index = options
    .iter()
    .position(|o| *o == entry.romanization)
    .unwrap_or(options.len() - 1);

  Question {
    id: Builder::from_random_bytes(rng.gen()).into_uuid(),
    prompt: entry.glyph.clone(),
    options,
    correct_index,
  }
}
