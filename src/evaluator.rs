//! Canonical lightness ordering and exact-sequence scoring.

use std::cmp::Reverse;

use crate::domain::{Direction, StimulusItem};

/// Sort a copy of `items` by lightness for the given direction.
///
/// `DarkToLight` is ascending, `LightToDark` descending. Equal lightness keeps input order.
pub fn canonical_order(items: &[StimulusItem], direction: Direction) -> Vec<StimulusItem> {
  let mut sorted = items.to_vec();
  match direction {
    Direction::DarkToLight => sorted.sort_by_key(|s| s.lightness),
    Direction::LightToDark => sorted.sort_by_key(|s| Reverse(s.lightness)),
  }
  sorted
}

/// Id sequence of `canonical_order`.
pub fn canonical_ids(items: &[StimulusItem], direction: Direction) -> Vec<String> {
  canonical_order(items, direction).into_iter().map(|s| s.id).collect()
}

/// Exact position-by-position equality. No partial credit.
pub fn is_correct<A: AsRef<str>, B: AsRef<str>>(current: &[A], canonical: &[B]) -> bool {
  current.len() == canonical.len()
    && current.iter().zip(canonical).all(|(a, b)| a.as_ref() == b.as_ref())
}

/// Score an arrangement: returns `(is_correct, current id order)`.
pub fn score(items: &[StimulusItem], direction: Direction) -> (bool, Vec<String>) {
  let order: Vec<String> = items.iter().map(|s| s.id.clone()).collect();
  let ok = is_correct(&order, &canonical_ids(items, direction));
  (ok, order)
}
