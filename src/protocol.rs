//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::arrangement::{DragOutcome, DragRelease};
use crate::catalog::Catalog;
use crate::domain::{AnswerRecord, Question, QuestionId, StimulusItem};
use crate::pagination::{PageEntry, SizeClass};
use crate::session::{Arrangement, QuestionStatus};
use crate::state::Attempt;
use crate::submission::SubmissionPayload;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    StartAttempt {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        age: Option<u32>,
    },
    CurrentQuestion {
        #[serde(rename = "attemptId")]
        attempt_id: Uuid,
    },
    DragRelease {
        #[serde(rename = "attemptId")]
        attempt_id: Uuid,
        #[serde(flatten)]
        event: DragRelease,
    },
    Navigate {
        #[serde(rename = "attemptId")]
        attempt_id: Uuid,
        #[serde(flatten)]
        target: NavigateIn,
    },
    Pagination {
        #[serde(rename = "attemptId")]
        attempt_id: Uuid,
        #[serde(flatten)]
        query: PaginationQuery,
    },
    Submit {
        #[serde(rename = "attemptId")]
        attempt_id: Uuid,
    },
    Abandon {
        #[serde(rename = "attemptId")]
        attempt_id: Uuid,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Attempt {
        attempt: AttemptOut,
    },
    Question {
        question: QuestionView,
    },
    DragResult {
        result: DragOut,
    },
    Pagination {
        pagination: PaginationOut,
    },
    Submitted {
        submission: SubmissionPayload,
    },
    Abandoned,
    Error {
        message: String,
    },
}

/// Swatch as the UI draws it.
#[derive(Debug, Serialize, PartialEq)]
pub struct SwatchOut {
    pub id: String,
    pub color: String,
    pub lightness: u8,
}

impl From<&StimulusItem> for SwatchOut {
    fn from(s: &StimulusItem) -> Self {
        SwatchOut { id: s.id.clone(), color: s.color.to_css(), lightness: s.lightness }
    }
}

#[derive(Debug, Serialize)]
pub struct NavEntryOut {
    pub id: QuestionId,
    pub status: QuestionStatus,
}

/// Everything needed to render the current question.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub index: usize,
    pub id: QuestionId,
    pub prompt: String,
    pub kind: &'static str,
    pub instruction: Option<&'static str>,
    pub swatches: Vec<SwatchOut>,
    pub options: Vec<String>,
    pub answer: Option<AnswerRecord>,
    pub completed: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub nav: Vec<NavEntryOut>,
}

impl QuestionView {
    /// View of `attempt`'s current question. `None` only if the catalog and session disagree.
    pub fn current(attempt: &Attempt, catalog: &Catalog) -> Option<Self> {
        let session = &attempt.session;
        let index = session.current_index();
        let question: &Question = catalog.get(index)?;

        let (swatches, options) = match session.arrangement(question.id) {
            Some(Arrangement::Swatches(items)) => (items.iter().map(SwatchOut::from).collect(), Vec::new()),
            Some(Arrangement::Labels(labels)) => (Vec::new(), labels.clone()),
            None => (Vec::new(), Vec::new()),
        };

        let nav = catalog
            .questions()
            .iter()
            .enumerate()
            .map(|(i, q)| NavEntryOut { id: q.id, status: session.status(i, q.id) })
            .collect();

        Some(QuestionView {
            index,
            id: question.id,
            prompt: question.prompt.clone(),
            kind: question.kind.tag(),
            instruction: question.instruction(),
            swatches,
            options,
            answer: session.answer(question.id).cloned(),
            completed: session.completed(),
            total: session.total(),
            has_prev: session.has_prev(),
            has_next: session.has_next(),
            nav,
        })
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct StartAttemptIn {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOut {
    pub attempt_id: Uuid,
    pub total_questions: usize,
    pub question: QuestionView,
}

#[derive(Debug, Serialize)]
pub struct DragOut {
    #[serde(flatten)]
    pub outcome: DragOutcome,
    pub question: QuestionView,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum NavigateIn {
    Next,
    Prev,
    Jump { index: usize },
}

/// Either an explicit size class or a viewport width to derive one from.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    #[serde(default)]
    pub size_class: Option<SizeClass>,
    #[serde(default)]
    pub viewport_width: Option<u32>,
}

impl PaginationQuery {
    /// Explicit class wins; then width; desktop if neither is given.
    pub fn size_class(&self) -> SizeClass {
        self.size_class
            .or_else(|| self.viewport_width.map(SizeClass::from_viewport_width))
            .unwrap_or(SizeClass::Desktop)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOut {
    pub size_class: SizeClass,
    pub current: usize,
    pub total: usize,
    pub entries: Vec<PageEntry>,
}

#[derive(Serialize)]
pub struct QuestionsOut {
    pub questions: Vec<Question>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
