//! Error types for catalog loading, submission sinks and attempt operations.
//!
//! Malformed drag events are deliberately absent: they are ignored, not failed.

use uuid::Uuid;

use crate::domain::QuestionId;

/// Catalog validation failures, raised once at load time.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("question catalog is empty")]
    Empty,

    #[error("question id must be positive")]
    ZeroId,

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),

    #[error("question {id}: option_count {count} outside 1..={max}")]
    OptionCount { id: QuestionId, count: usize, max: usize },

    #[error("question {0}: label question has no options")]
    MissingOptions(QuestionId),

    #[error("question {id}: option '{option}' is listed twice")]
    DuplicateOption { id: QuestionId, option: String },
}

/// Failures reported by a submission sink. Passed to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("sink rejected submission: {0}")]
    Rejected(String),
}

/// Attempt-level failures surfaced to HTTP/WebSocket callers.
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    /// Name or age absent. The shell redirects back to identity capture.
    #[error("missing identity: {0} is required before starting an assessment")]
    MissingIdentity(&'static str),

    #[error("unknown attempt {0}")]
    UnknownAttempt(Uuid),

    #[error("question index {index} out of range (total {total})")]
    IndexOutOfRange { index: usize, total: usize },

    #[error("submission failed: {0}")]
    Submission(#[from] SinkError),
}
