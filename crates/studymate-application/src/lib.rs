//! Application layer for StudyMate.
//!
//! Provides the `StudySessionController`, which orchestrates the external
//! services from `studymate-core` and owns all state for one open study
//! session.

pub mod session;

pub use session::controller::{QUIZ_QUESTION_COUNT, StudySessionController};
pub use session::snapshot::SessionSnapshot;
