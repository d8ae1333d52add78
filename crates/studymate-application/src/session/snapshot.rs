//! Serializable view of a study session.

use serde::Serialize;
use studymate_core::chat::ChatMessage;
use studymate_core::document::Document;
use studymate_core::language::Language;
use studymate_core::page::PageView;
use studymate_core::quiz::QuizWorkflow;

/// A point-in-time view of the whole session, cloned out of the controller
/// for the presentation layer to render. The controller's state is the single
/// source of truth; this is a copy, never a handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Backend identifier of the document being studied.
    pub pdf_id: String,
    /// The session language.
    pub language: Language,
    /// Document metadata, absent until the registry lookup resolves.
    pub document: Option<Document>,
    /// Page count for navigation bounds; 1 until the document resolves.
    pub total_pages: u32,
    /// The active page: number, cached image, explanation lifecycle.
    pub page: PageView,
    /// The doubt chat transcript for the active page's explanation.
    pub messages: Vec<ChatMessage>,
    /// The quiz workflow state.
    pub quiz: QuizWorkflow,
}
