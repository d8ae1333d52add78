//! Service traits for the external collaborators of a study session.
//!
//! Each trait models one backend capability. The application layer consumes
//! them as `Arc<dyn _>` so that the HTTP client and test doubles are
//! interchangeable.

use crate::document::Document;
use crate::error::Result;
use crate::language::Language;
use crate::page::{Explanation, PageImage};
use crate::quiz::Quiz;
use async_trait::async_trait;

/// Looks up metadata for an uploaded document.
#[async_trait]
pub trait DocumentRegistry: Send + Sync {
    /// Fetches display name and page count for a document.
    async fn fetch_document(&self, pdf_id: &str) -> Result<Document>;
}

/// Provides renderable images of individual pages.
#[async_trait]
pub trait PageImageProvider: Send + Sync {
    /// Fetches the image for one page of a document.
    async fn fetch_page_image(&self, pdf_id: &str, page_no: u32) -> Result<PageImage>;
}

/// Generates natural-language explanations of individual pages.
#[async_trait]
pub trait ExplanationService: Send + Sync {
    /// Explains one page in the given language, returning the explanation
    /// together with the page's extracted raw text.
    async fn explain_page(
        &self,
        pdf_id: &str,
        page_no: u32,
        language: Language,
    ) -> Result<Explanation>;
}

/// Answers follow-up questions grounded in one page.
#[async_trait]
pub trait DoubtAnswerService: Send + Sync {
    /// Answers a doubt about one page in the given language.
    async fn answer_doubt(
        &self,
        pdf_id: &str,
        page_no: u32,
        query: &str,
        language: Language,
    ) -> Result<String>;
}

/// Generates multiple-choice quizzes over a set of pages.
#[async_trait]
pub trait QuizService: Send + Sync {
    /// Generates a quiz of `num_questions` questions over the given pages.
    ///
    /// `pages` is expected in ascending order.
    async fn generate_quiz(
        &self,
        pdf_id: &str,
        pages: &[u32],
        language: Language,
        num_questions: u32,
    ) -> Result<Quiz>;
}
