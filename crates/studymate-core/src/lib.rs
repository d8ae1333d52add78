//! Domain layer for StudyMate.
//!
//! Defines the typed error, the domain models (document, page, chat, quiz),
//! and the async service traits for the external collaborators of a study
//! session. Business logic lives in `studymate-application`; the HTTP client
//! lives in `studymate-interaction`.

pub mod chat;
pub mod document;
pub mod error;
pub mod language;
pub mod page;
pub mod quiz;
pub mod services;

// Re-export common error type
pub use error::{Result, StudyError};
