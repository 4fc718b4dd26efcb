//! Read-only question catalog: validated once, sorted by id, shared by every attempt.

use std::collections::HashSet;

use crate::domain::{Question, QuestionId, QuestionKind};
use crate::error::CatalogError;
use crate::palette::MAX_SWATCHES;

#[derive(Clone, Debug)]
pub struct Catalog {
  questions: Vec<Question>,
}

impl Catalog {
  /// Validate and sort. Ids must be positive and unique; label questions need
  /// distinct options; swatch counts must fit the palette range.
  pub fn new(mut questions: Vec<Question>) -> Result<Self, CatalogError> {
    if questions.is_empty() {
      return Err(CatalogError::Empty);
    }
    let mut seen = HashSet::new();
    for q in &questions {
      if q.id == 0 {
        return Err(CatalogError::ZeroId);
      }
      if !seen.insert(q.id) {
        return Err(CatalogError::DuplicateId(q.id));
      }
      match &q.kind {
        QuestionKind::OrderByLightness { option_count, .. } => {
          if *option_count == 0 || *option_count > MAX_SWATCHES {
            return Err(CatalogError::OptionCount { id: q.id, count: *option_count, max: MAX_SWATCHES });
          }
        }
        QuestionKind::FreeReorder { options } | QuestionKind::SelectTarget { options } => {
          if options.is_empty() {
            return Err(CatalogError::MissingOptions(q.id));
          }
          let mut labels = HashSet::new();
          for o in options {
            if !labels.insert(o.as_str()) {
              return Err(CatalogError::DuplicateOption { id: q.id, option: o.clone() });
            }
          }
        }
      }
    }
    questions.sort_by_key(|q| q.id);
    Ok(Self { questions })
  }

  pub fn len(&self) -> usize { self.questions.len() }

  pub fn is_empty(&self) -> bool { self.questions.is_empty() }

  /// Question at display position `index` (0-based).
  pub fn get(&self, index: usize) -> Option<&Question> { self.questions.get(index) }

  pub fn by_id(&self, id: QuestionId) -> Option<&Question> {
    self.questions.iter().find(|q| q.id == id)
  }

  pub fn questions(&self) -> &[Question] { &self.questions }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Direction;

  fn order_q(id: QuestionId, option_count: usize) -> Question {
    Question {
      id,
      prompt: format!("q{id}"),
      kind: QuestionKind::OrderByLightness { direction: Direction::LightToDark, option_count },
    }
  }

  #[test]
  fn sorts_by_id() {
    let cat = Catalog::new(vec![order_q(3, 4), order_q(1, 4), order_q(2, 4)]).unwrap();
    let ids: Vec<_> = cat.questions().iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(cat.by_id(2).map(|q| q.prompt.as_str()), Some("q2"));
    assert!(cat.get(3).is_none());
  }

  #[test]
  fn rejects_bad_entries() {
    assert_eq!(Catalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    assert_eq!(Catalog::new(vec![order_q(0, 4)]).unwrap_err(), CatalogError::ZeroId);
    assert_eq!(
      Catalog::new(vec![order_q(1, 4), order_q(1, 4)]).unwrap_err(),
      CatalogError::DuplicateId(1)
    );
    assert_eq!(
      Catalog::new(vec![order_q(1, 7)]).unwrap_err(),
      CatalogError::OptionCount { id: 1, count: 7, max: 6 }
    );
    let empty_labels = Question { id: 1, prompt: "x".into(), kind: QuestionKind::SelectTarget { options: vec![] } };
    assert_eq!(Catalog::new(vec![empty_labels]).unwrap_err(), CatalogError::MissingOptions(1));
    let dup_labels = Question {
      id: 2,
      prompt: "x".into(),
      kind: QuestionKind::FreeReorder { options: vec!["a".into(), "a".into()] },
    };
    assert_eq!(
      Catalog::new(vec![dup_labels]).unwrap_err(),
      CatalogError::DuplicateOption { id: 2, option: "a".into() }
    );
  }
}
