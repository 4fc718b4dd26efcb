//! Per-attempt session state.
//!
//! A `SessionState` is created when an attempt starts and dropped on submit or
//! abandon. It owns every mutable piece of the attempt: the current question
//! pointer, the live arrangement per question and the answer per question. The
//! catalog is never written to.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::{AnswerRecord, Question, QuestionId, QuestionKind, StimulusItem};
use crate::error::AttemptError;
use crate::palette;

/// Live, user-manipulable order of one question's draggable items.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum Arrangement {
    Swatches(Vec<StimulusItem>),
    Labels(Vec<String>),
}

impl Arrangement {
    /// Initial arrangement for a question: shuffled swatches or the catalog's label order.
    pub fn for_question<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        match &question.kind {
            QuestionKind::OrderByLightness { option_count, .. } => {
                Arrangement::Swatches(palette::generate(rng, *option_count))
            }
            QuestionKind::FreeReorder { options } | QuestionKind::SelectTarget { options } => {
                Arrangement::Labels(options.clone())
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Arrangement::Swatches(items) => items.len(),
            Arrangement::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<String> {
        match self {
            Arrangement::Swatches(items) => items.iter().map(|s| s.id.clone()).collect(),
            Arrangement::Labels(labels) => labels.clone(),
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        match self {
            Arrangement::Swatches(items) => items.iter().position(|s| s.id == id),
            Arrangement::Labels(labels) => labels.iter().position(|l| l == id),
        }
    }

    /// Exchange the items at positions `i` and `j`; every other position is untouched.
    pub fn transpose(&mut self, i: usize, j: usize) {
        match self {
            Arrangement::Swatches(items) => items.swap(i, j),
            Arrangement::Labels(labels) => labels.swap(i, j),
        }
    }

    /// Copy with the items `a` and `b` exchanged, or `None` if either id is absent.
    pub fn transposed(&self, a: &str, b: &str) -> Option<Arrangement> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        let mut next = self.clone();
        next.transpose(i, j);
        Some(next)
    }
}

/// Display status of one question in the navigation bar.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    Answered,
    Current,
    Pending,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    current_index: usize,
    total: usize,
    arrangements: BTreeMap<QuestionId, Arrangement>,
    answers: BTreeMap<QuestionId, AnswerRecord>,
}

impl SessionState {
    /// Seed a fresh session: one initial arrangement per catalog question.
    pub fn new<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Self {
        let arrangements = catalog
            .questions()
            .iter()
            .map(|q| (q.id, Arrangement::for_question(q, rng)))
            .collect();
        Self {
            current_index: 0,
            total: catalog.len(),
            arrangements,
            answers: BTreeMap::new(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn arrangement(&self, id: QuestionId) -> Option<&Arrangement> {
        self.arrangements.get(&id)
    }

    pub fn answer(&self, id: QuestionId) -> Option<&AnswerRecord> {
        self.answers.get(&id)
    }

    pub fn answers(&self) -> &BTreeMap<QuestionId, AnswerRecord> {
        &self.answers
    }

    /// Number of questions with an answer record.
    pub fn completed(&self) -> usize {
        self.answers.len()
    }

    pub fn has_prev(&self) -> bool {
        self.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.total
    }

    /// Advance one question; stays on the last one.
    pub fn next(&mut self) -> usize {
        if self.has_next() {
            self.current_index += 1;
        }
        self.current_index
    }

    /// Go back one question; stays on the first one.
    pub fn prev(&mut self) -> usize {
        self.current_index = self.current_index.saturating_sub(1);
        self.current_index
    }

    pub fn jump(&mut self, index: usize) -> Result<usize, AttemptError> {
        if index >= self.total {
            return Err(AttemptError::IndexOutOfRange { index, total: self.total });
        }
        self.current_index = index;
        Ok(index)
    }

    /// Answered wins over current, matching the navigation bar colouring.
    pub fn status(&self, index: usize, id: QuestionId) -> QuestionStatus {
        if self.answers.contains_key(&id) {
            QuestionStatus::Answered
        } else if index == self.current_index {
            QuestionStatus::Current
        } else {
            QuestionStatus::Pending
        }
    }

    /// Write an arrangement and its answer together.
    ///
    /// Both values must be derived from the same snapshot of `self`.
    pub(crate) fn commit(&mut self, id: QuestionId, arrangement: Option<Arrangement>, answer: AnswerRecord) {
        if let Some(arrangement) = arrangement {
            self.arrangements.insert(id, arrangement);
        }
        self.answers.insert(id, answer);
    }
}
