//! The kana catalog: every glyph with its romanization, plus the distinct
//! romanization pool used to draw distractors.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::CatalogError;
use crate::kana::all_tables;

/// Options shown per question (one answer + three distractors).
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KanaEntry {
  pub glyph: String,
  pub romanization: String,
}

impl KanaEntry {
  pub fn new(glyph: impl Into<String>, romanization: impl Into<String>) -> Self {
    Self { glyph: glyph.into(), romanization: romanization.into() }
  }
}

/// Immutable glyph -> romanization table.
#[derive(Clone, Debug)]
pub struct KanaCatalog {
  entries: Vec<KanaEntry>,
  /// Distinct romanizations, in first-seen order.
  pool: Vec<String>,
}

impl KanaCatalog {
  /// Built-in catalog: hiragana, katakana, dakuten and digraphs.
  pub fn load() -> Self {
    let entries = all_tables()
      .into_iter()
      .flat_map(|table| table.iter())
      .map(|(glyph, romaji)| KanaEntry::new(*glyph, *romaji))
      .collect::<Vec<_>>();
    let pool = distinct_romanizations(&entries);
    Self { entries, pool }
  }

  /// Build a catalog from arbitrary entries. The pool must be large enough to
  /// fill a full option list.
  pub fn from_entries(entries: Vec<KanaEntry>) -> Result<Self, CatalogError> {
    Self::with_extra_romanizations(entries, Vec::new())
  }

  /// Like [`KanaCatalog::from_entries`], with romanizations that are only ever
  /// used as distractors (no glyph is asked for them).
  pub fn with_extra_romanizations(
    entries: Vec<KanaEntry>,
    extra: impl IntoIterator<Item = String>,
  ) -> Result<Self, CatalogError> {
    let mut pool = distinct_romanizations(&entries);
    for romaji in extra {
      if !pool.contains(&romaji) {
        pool.push(romaji);
      }
    }
    if entries.is_empty() {
      return Err(CatalogError::Empty);
    }
    if pool.len() < OPTIONS_PER_QUESTION {
      return Err(CatalogError::PoolTooSmall { distinct: pool.len(), required: OPTIONS_PER_QUESTION });
    }
    Ok(Self { entries, pool })
  }

  pub fn entries(&self) -> &[KanaEntry] {
    &self.entries
  }

  pub fn romanization_pool(&self) -> &[String] {
    &self.pool
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Uniform over entries, so glyphs sharing a romanization stay individually weighted.
  pub fn random_entry<R: Rng + ?Sized>(&self, rng: &mut R) -> &KanaEntry {
    // constructors reject empty entry lists
    &self.entries[rng.gen_range(0..self.entries.len())]
  }

  /// Draw up to `count` distinct romanizations other than `excluding`.
  ///
  /// Each draw picks uniformly from the pool; repeats and the excluded value are
  /// skipped. Stops after `max_attempts` draws, so the result may be short.
  pub fn random_romanizations<R: Rng + ?Sized>(
    &self,
    excluding: &str,
    count: usize,
    max_attempts: usize,
    rng: &mut R,
  ) -> Vec<String> {
    let mut drawn: Vec<String> = Vec::with_capacity(count);
    let mut attempts = 0;
    while drawn.len() < count && attempts < max_attempts {
      attempts += 1;
      let Some(candidate) = self.pool.choose(rng) else { break };
      if candidate != excluding && !drawn.contains(candidate) {
        drawn.push(candidate.clone());
      }
    }
    drawn
  }
}

fn distinct_romanizations(entries: &[KanaEntry]) -> Vec<String> {
  let mut seen = HashSet::new();
  entries
    .iter()
    .filter(|e| seen.insert(e.romanization.as_str()))
    .map(|e| e.romanization.clone())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn small_catalog() -> KanaCatalog {
    KanaCatalog::from_entries(vec![
      KanaEntry::new("あ", "a"),
      KanaEntry::new("い", "i"),
      KanaEntry::new("う", "u"),
      KanaEntry::new("え", "e"),
      KanaEntry::new("ア", "a"),
    ])
    .expect("catalog")
  }

  #[test]
  fn builtin_catalog_keeps_duplicate_romanizations() {
    let catalog = KanaCatalog::load();
    assert_eq!(catalog.len(), 184);
    let pool = catalog.romanization_pool();
    assert!(pool.len() < catalog.len());
    let unique: HashSet<_> = pool.iter().collect();
    assert_eq!(unique.len(), pool.len());
    assert!(pool.iter().any(|r| r == "ji"));
  }

  #[test]
  fn from_entries_rejects_small_pool() {
    let err = KanaCatalog::from_entries(vec![
      KanaEntry::new("あ", "a"),
      KanaEntry::new("ア", "a"),
      KanaEntry::new("い", "i"),
      KanaEntry::new("う", "u"),
    ])
    .unwrap_err();
    assert_eq!(err, CatalogError::PoolTooSmall { distinct: 3, required: 4 });
  }

  #[test]
  fn extra_romanizations_only_feed_the_pool() {
    let catalog = KanaCatalog::with_extra_romanizations(
      vec![KanaEntry::new("あ", "a")],
      ["i", "u", "e", "a"].map(String::from),
    )
    .expect("catalog");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.romanization_pool(), ["a", "i", "u", "e"]);
    let empty = KanaCatalog::with_extra_romanizations(Vec::new(), ["a", "i", "u", "e"].map(String::from));
    assert_eq!(empty.unwrap_err(), CatalogError::Empty);
  }

  #[test]
  fn random_entry_reaches_every_glyph() {
    let catalog = small_catalog();
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen = HashSet::new();
    for _ in 0..500 {
      seen.insert(catalog.random_entry(&mut rng).glyph.clone());
    }
    // both あ and ア are selectable even though they share "a"
    assert_eq!(seen.len(), 5);
  }

  #[test]
  fn random_romanizations_skips_excluded_and_repeats() {
    let catalog = small_catalog();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
      let got = catalog.random_romanizations("a", 3, 500, &mut rng);
      assert_eq!(got.len(), 3);
      assert!(!got.iter().any(|r| r == "a"));
      let unique: HashSet<_> = got.iter().collect();
      assert_eq!(unique.len(), 3);
    }
  }

  #[test]
  fn random_romanizations_returns_short_when_pool_exhausted() {
    let catalog = small_catalog();
    let mut rng = StdRng::seed_from_u64(1);
    let got = catalog.random_romanizations("a", 10, 500, &mut rng);
    assert_eq!(got.len(), 3);
    assert!(catalog.random_romanizations("a", 3, 0, &mut rng).is_empty());
  }
}
