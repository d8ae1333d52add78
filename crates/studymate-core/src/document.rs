//! Document domain model.

use serde::{Deserialize, Serialize};

/// Metadata for an uploaded PDF document.
///
/// Fetched once per study session when the session is entered, and immutable
/// afterwards. The page count bounds the navigation state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque backend identifier for the document.
    pub id: String,
    /// Display name of the uploaded file.
    pub file_name: String,
    /// Total number of pages, always at least 1.
    pub total_pages: u32,
}

impl Document {
    /// Creates document metadata, clamping the page count to at least 1.
    pub fn new(id: impl Into<String>, file_name: impl Into<String>, total_pages: u32) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            total_pages: total_pages.max(1),
        }
    }
}
