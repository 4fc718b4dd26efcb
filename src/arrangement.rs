//! Drag-release handling for the current question.
//!
//! The pointer/touch layer only has to report which item was released
//! (`active_id`) and what it was released over (`over_id`). Everything after
//! that happens here, in one synchronous step per event:
//!   - ordering questions: swap the two items, re-score, record `{isCorrect, order}`
//!   - free reorder: swap the two items, record `{order}` (no scoring)
//!   - target selection: a drop on the target zone records `{value}`
//!
//! Events that reference unknown ids are ignored and logged; they never fail.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{AnswerRecord, Question, QuestionKind, TARGET_ZONE};
use crate::evaluator;
use crate::session::{Arrangement, SessionState};

/// One completed drag gesture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DragRelease {
    #[serde(rename = "activeId")]
    pub active_id: String,
    #[serde(rename = "overId", default)]
    pub over_id: Option<String>,
}

impl DragRelease {
    pub fn new(active_id: impl Into<String>, over_id: Option<&str>) -> Self {
        Self { active_id: active_id.into(), over_id: over_id.map(str::to_string) }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    NoDropTarget,
    SameItem,
    UnknownItem,
    NotTargetZone,
    /// Stored arrangement does not match the question kind.
    ArrangementMismatch,
}

/// What a drag release did to the session.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    /// No state change.
    Ignored { reason: IgnoreReason },
    /// Two items swapped; answer rewritten.
    Reordered { answer: AnswerRecord },
    /// Target value recorded.
    Selected { answer: AnswerRecord },
}

/// Apply one drag release to `question`'s arrangement in `session`.
///
/// The new arrangement and answer are both computed from the same read of
/// `session` and committed together.
#[instrument(level = "debug", skip(session, question), fields(question_id = question.id, kind = question.kind.tag()))]
pub fn on_drag_release(session: &mut SessionState, question: &Question, event: &DragRelease) -> DragOutcome {
    let over = match event.over_id.as_deref() {
        None => return ignored(question, event, IgnoreReason::NoDropTarget),
        Some(over) if over == event.active_id => return ignored(question, event, IgnoreReason::SameItem),
        Some(over) => over,
    };

    match &question.kind {
        QuestionKind::SelectTarget { options } => {
            if over != TARGET_ZONE {
                return ignored(question, event, IgnoreReason::NotTargetZone);
            }
            if !options.iter().any(|o| *o == event.active_id) {
                return ignored(question, event, IgnoreReason::UnknownItem);
            }
            let answer = AnswerRecord::Selected { value: event.active_id.clone() };
            session.commit(question.id, None, answer.clone());
            debug!(target: "attempt", question_id = question.id, value = %event.active_id, "Target selected");
            DragOutcome::Selected { answer }
        }

        QuestionKind::OrderByLightness { direction, .. } => {
            let items = match swapped(session, question, &event.active_id, over) {
                Some(Arrangement::Swatches(items)) => items,
                Some(Arrangement::Labels(_)) => return ignored(question, event, IgnoreReason::ArrangementMismatch),
                None => return ignored(question, event, IgnoreReason::UnknownItem),
            };
            let (is_correct, order) = evaluator::score(&items, *direction);
            let answer = AnswerRecord::Ordered { is_correct, order };
            session.commit(question.id, Some(Arrangement::Swatches(items)), answer.clone());
            debug!(target: "attempt", question_id = question.id, ?answer, "Swatches reordered");
            DragOutcome::Reordered { answer }
        }

        QuestionKind::FreeReorder { .. } => {
            let Some(next) = swapped(session, question, &event.active_id, over) else {
                return ignored(question, event, IgnoreReason::UnknownItem);
            };
            let answer = AnswerRecord::Arranged { order: next.ids() };
            session.commit(question.id, Some(next), answer.clone());
            debug!(target: "attempt", question_id = question.id, ?answer, "Labels reordered");
            DragOutcome::Reordered { answer }
        }
    }
}

fn swapped(session: &SessionState, question: &Question, a: &str, b: &str) -> Option<Arrangement> {
    session.arrangement(question.id)?.transposed(a, b)
}

fn ignored(question: &Question, event: &DragRelease, reason: IgnoreReason) -> DragOutcome {
    debug!(
        target: "attempt",
        question_id = question.id,
        active = %event.active_id,
        over = ?event.over_id,
        ?reason,
        "Drag release ignored"
    );
    DragOutcome::Ignored { reason }
}
