//! # Shade assessment
//!
//! Scoring and session engine for a drag-and-drop color assessment, plus the
//! axum shell that serves it.
//!
//! A respondent works through a catalog of questions. Most questions show a
//! shuffled set of swatches sharing one hue and saturation, and ask for them
//! to be ordered by lightness. Every drag release swaps two swatches and
//! re-scores the question. Two label-based variants exist alongside: free
//! arrangement (never scored) and dropping one label onto a target.
//!
//! | Module | Role |
//! |--------|------|
//! | [`palette`] | Swatch generation |
//! | [`evaluator`] | Canonical order and exact-match scoring |
//! | [`session`] | Per-attempt state: pointer, arrangements, answers |
//! | [`arrangement`] | Drag-release handling, single dispatch on question kind |
//! | [`pagination`] | Compact page-indicator window |
//! | [`catalog`] | Validated read-only question list |
//! | [`submission`] | Finished-attempt payload and sinks |
//! | [`state`], [`logic`], [`routes`] | Attempts registry and HTTP/WebSocket shell |

pub mod arrangement;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod evaluator;
pub mod logic;
pub mod pagination;
pub mod palette;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod session;
pub mod state;
pub mod submission;
pub mod telemetry;
