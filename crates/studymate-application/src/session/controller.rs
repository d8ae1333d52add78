//! The study session controller.
//!
//! Owns all state for one open study session: the active page and its
//! explanation, the doubt chat transcript, and the quiz workflow. Sequences
//! calls to the external services and folds their responses back into the
//! state, dropping any response that belongs to a page (or quiz attempt) that
//! is no longer current.

use crate::session::snapshot::SessionSnapshot;
use std::sync::Arc;
use studymate_core::chat::ChatMessage;
use studymate_core::document::Document;
use studymate_core::error::{Result, StudyError};
use studymate_core::language::Language;
use studymate_core::page::{ExplanationState, PageView};
use studymate_core::quiz::{QuizStatus, QuizWorkflow};
use studymate_core::services::{
    DocumentRegistry, DoubtAnswerService, ExplanationService, PageImageProvider, QuizService,
};
use tokio::sync::RwLock;

/// Number of questions requested per quiz.
pub const QUIZ_QUESTION_COUNT: u32 = 5;

/// All mutable state of one session, guarded by a single lock.
///
/// `generation` increments on every page change; `quiz_epoch` increments on
/// every quiz-workflow reset. Async completions capture the counter at issue
/// time and are dropped if it moved while they were in flight.
struct SessionState {
    document: Option<Document>,
    page: PageView,
    generation: u64,
    messages: Vec<ChatMessage>,
    quiz: QuizWorkflow,
    quiz_epoch: u64,
}

impl SessionState {
    fn new() -> Self {
        Self {
            document: None,
            page: PageView::new(1),
            generation: 0,
            messages: Vec::new(),
            quiz: QuizWorkflow::default(),
            quiz_epoch: 0,
        }
    }

    fn total_pages(&self) -> u32 {
        self.document.as_ref().map(|d| d.total_pages).unwrap_or(1)
    }

    /// Starts a fresh view for `number`: new generation, no image, no
    /// explanation, empty chat.
    fn begin_page(&mut self, number: u32) {
        self.generation += 1;
        self.page = PageView::new(number);
        self.messages.clear();
    }

    fn reset_quiz(&mut self) {
        self.quiz.reset();
        self.quiz_epoch += 1;
    }
}

/// Orchestrates one open study session.
///
/// All methods take `&self`; the session state lives behind an `RwLock` so a
/// single controller instance can be shared (via `Arc`) between the event
/// handlers of the presentation layer. Every external-service call is awaited
/// outside the lock, and its completion is applied only if the page
/// generation (or quiz epoch) captured at issue time is still current.
pub struct StudySessionController {
    pdf_id: String,
    language: Language,
    registry: Arc<dyn DocumentRegistry>,
    images: Arc<dyn PageImageProvider>,
    explanations: Arc<dyn ExplanationService>,
    doubts: Arc<dyn DoubtAnswerService>,
    quizzes: Arc<dyn QuizService>,
    state: RwLock<SessionState>,
}

impl StudySessionController {
    /// Creates a controller for one document with the given collaborators.
    ///
    /// # Arguments
    ///
    /// * `pdf_id` - Backend identifier of the document to study
    /// * `language` - Explanation language, fixed for the session
    /// * `registry` / `images` / `explanations` / `doubts` / `quizzes` -
    ///   the five external services
    pub fn new(
        pdf_id: impl Into<String>,
        language: Language,
        registry: Arc<dyn DocumentRegistry>,
        images: Arc<dyn PageImageProvider>,
        explanations: Arc<dyn ExplanationService>,
        doubts: Arc<dyn DoubtAnswerService>,
        quizzes: Arc<dyn QuizService>,
    ) -> Self {
        Self {
            pdf_id: pdf_id.into(),
            language,
            registry,
            images,
            explanations,
            doubts,
            quizzes,
            state: RwLock::new(SessionState::new()),
        }
    }

    /// Creates a controller from a single backend that implements every
    /// service trait (such as `StudyMateApiClient`).
    pub fn with_backend<T>(pdf_id: impl Into<String>, language: Language, backend: Arc<T>) -> Self
    where
        T: DocumentRegistry
            + PageImageProvider
            + ExplanationService
            + DoubtAnswerService
            + QuizService
            + 'static,
    {
        Self::new(
            pdf_id,
            language,
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
        )
    }

    /// Returns the document identifier this session studies.
    pub fn pdf_id(&self) -> &str {
        &self.pdf_id
    }

    /// Returns the session language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the active page number.
    pub async fn current_page(&self) -> u32 {
        self.state.read().await.page.number
    }

    /// Returns the navigation bound; 1 until the document resolves.
    pub async fn total_pages(&self) -> u32 {
        self.state.read().await.total_pages()
    }

    /// Clones a point-in-time view of the whole session for rendering.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            pdf_id: self.pdf_id.clone(),
            language: self.language,
            document: state.document.clone(),
            total_pages: state.total_pages(),
            page: state.page.clone(),
            messages: state.messages.clone(),
            quiz: state.quiz.clone(),
        }
    }

    /// Enters the session: fetches document metadata, then the first page's
    /// image.
    ///
    /// # Errors
    ///
    /// Returns the registry error if the metadata lookup fails; the session
    /// stays usable with the provisional one-page bound and the call can be
    /// retried.
    pub async fn initialize(&self) -> Result<()> {
        self.load_document().await?;
        self.refresh_page_image().await;
        Ok(())
    }

    /// Fetches document metadata. Done once per session on entry.
    pub async fn load_document(&self) -> Result<()> {
        let document = self.registry.fetch_document(&self.pdf_id).await?;
        tracing::info!(
            pdf_id = %self.pdf_id,
            file_name = %document.file_name,
            total_pages = document.total_pages,
            "document loaded"
        );

        let mut state = self.state.write().await;
        state.document = Some(document);
        Ok(())
    }

    /// Advances to the next page. No-op at the last page.
    pub async fn next_page(&self) {
        let target = {
            let state = self.state.read().await;
            state.page.number.saturating_add(1).min(state.total_pages())
        };
        self.jump_to(target).await;
    }

    /// Goes back to the previous page. No-op at the first page.
    pub async fn prev_page(&self) {
        let target = {
            let state = self.state.read().await;
            state.page.number.saturating_sub(1).max(1)
        };
        self.jump_to(target).await;
    }

    /// Jumps to a page, clamped to `[1, total_pages]`.
    ///
    /// Any page change resets the explanation, clears the chat, drops the
    /// cached image, and issues a fresh image fetch for the new page.
    /// Jumping to the current page is a no-op.
    pub async fn jump_to(&self, page_no: u32) {
        let changed = {
            let mut state = self.state.write().await;
            let target = page_no.clamp(1, state.total_pages());
            if target == state.page.number {
                false
            } else {
                tracing::debug!(from = state.page.number, to = target, "page change");
                state.begin_page(target);
                true
            }
        };

        if changed {
            self.refresh_page_image().await;
        }
    }

    /// Fetches the image for the active page and caches it.
    ///
    /// A failure leaves the image unset; a completion for a page that is no
    /// longer current is dropped.
    pub async fn refresh_page_image(&self) {
        let (page_no, issued_at) = {
            let state = self.state.read().await;
            (state.page.number, state.generation)
        };

        match self.images.fetch_page_image(&self.pdf_id, page_no).await {
            Ok(image) => {
                let mut state = self.state.write().await;
                if state.generation != issued_at {
                    tracing::debug!(page_no, "dropping stale page image");
                    return;
                }
                state.page.image = Some(image);
            }
            Err(err) => {
                tracing::warn!(page_no, %err, "failed to fetch page image");
            }
        }
    }

    /// Requests an AI explanation of the active page.
    ///
    /// At most one explanation request is in flight per page: a duplicate
    /// invocation while `Loading` is suppressed without a network call.
    /// Allowed from `NotRequested` and `Failed`; a fresh explanation clears
    /// the chat transcript.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the page is already explained - the only way
    /// back is navigating away. Service failures do not surface here; they
    /// land in `ExplanationState::Failed` for retry.
    pub async fn request_explanation(&self) -> Result<()> {
        let (page_no, issued_at) = {
            let mut state = self.state.write().await;
            match &state.page.explanation {
                ExplanationState::Loading => {
                    tracing::debug!(
                        page_no = state.page.number,
                        "explanation request already in flight"
                    );
                    return Ok(());
                }
                ExplanationState::Ready(_) => {
                    return Err(StudyError::invalid_state(
                        "page is already explained; navigate away to request again",
                    ));
                }
                ExplanationState::NotRequested | ExplanationState::Failed { .. } => {}
            }
            state.page.explanation = ExplanationState::Loading;
            (state.page.number, state.generation)
        };

        let result = self
            .explanations
            .explain_page(&self.pdf_id, page_no, self.language)
            .await;

        let mut state = self.state.write().await;
        if state.generation != issued_at {
            tracing::debug!(page_no, "dropping stale explanation");
            return Ok(());
        }

        match result {
            Ok(explanation) => {
                state.page.explanation = ExplanationState::Ready(explanation);
                state.messages.clear();
            }
            Err(err) => {
                tracing::warn!(page_no, %err, "explanation request failed");
                state.page.explanation = ExplanationState::Failed {
                    message: err.to_string(),
                };
            }
        }
        Ok(())
    }

    /// Submits a doubt about the explained page.
    ///
    /// The user message is appended synchronously; the assistant reply (the
    /// answer, or a human-readable error report) is appended when the service
    /// call completes. Multiple doubts may be in flight at once; replies
    /// append in arrival order and a reply for a page that is no longer
    /// current is dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank question and `InvalidState` if the
    /// page has no explanation yet - both without any network call. A service
    /// failure is NOT an error here: it becomes a visible assistant message
    /// so the transcript stays gap-free.
    pub async fn submit_doubt(&self, question: &str) -> Result<()> {
        let question = question.trim();
        if question.is_empty() {
            return Err(StudyError::invalid_input("doubt question is blank"));
        }

        let (page_no, issued_at) = {
            let mut state = self.state.write().await;
            if !state.page.explanation.is_ready() {
                return Err(StudyError::invalid_state(
                    "explain the page before asking doubts",
                ));
            }
            state.messages.push(ChatMessage::user(question));
            (state.page.number, state.generation)
        };

        let reply = match self
            .doubts
            .answer_doubt(&self.pdf_id, page_no, question, self.language)
            .await
        {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(page_no, %err, "doubt request failed");
                if err.is_network() {
                    "Connection error. Please try again.".to_string()
                } else {
                    format!("Error: {}", err)
                }
            }
        };

        let mut state = self.state.write().await;
        if state.generation != issued_at {
            tracing::debug!(page_no, "dropping doubt answer for a superseded page");
            return Ok(());
        }
        state.messages.push(ChatMessage::assistant(reply));
        Ok(())
    }

    /// Opens the quiz modal: status `Idle`, selection cleared.
    pub async fn open_quiz(&self) {
        let mut state = self.state.write().await;
        state.reset_quiz();
    }

    /// Toggles a page's membership in the quiz selection.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` while a quiz is generating or rendered, and
    /// `InvalidInput` for a page outside `[1, total_pages]`.
    pub async fn toggle_page_selection(&self, page_no: u32) -> Result<()> {
        let mut state = self.state.write().await;
        if !state.quiz.selection_editable() {
            return Err(StudyError::invalid_state(
                "quiz selection is frozen while generating or rendered",
            ));
        }
        if page_no < 1 || page_no > state.total_pages() {
            return Err(StudyError::invalid_input(format!(
                "page {} is out of range",
                page_no
            )));
        }
        state.quiz.toggle_page(page_no);
        Ok(())
    }

    /// Generates a quiz over the selected pages.
    ///
    /// At most one generation request is in flight: a duplicate invocation
    /// while `Generating` is suppressed without a network call. The result is
    /// validated before it is rendered; a short or inconsistent quiz lands in
    /// `Failed` like any other failure. A completion for a workflow that was
    /// reset (closed or discarded) in the meantime is dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if no pages are selected - status unchanged,
    /// zero network calls.
    pub async fn generate_quiz(&self) -> Result<()> {
        let (pages, issued_epoch) = {
            let mut state = self.state.write().await;
            if state.quiz.status.is_generating() {
                tracing::debug!("quiz generation already in flight");
                return Ok(());
            }
            if state.quiz.selected_pages.is_empty() {
                return Err(StudyError::invalid_input("select at least one page"));
            }
            state.quiz.status = QuizStatus::Generating;
            (state.quiz.sorted_pages(), state.quiz_epoch)
        };

        let result = self
            .quizzes
            .generate_quiz(&self.pdf_id, &pages, self.language, QUIZ_QUESTION_COUNT)
            .await
            .and_then(|quiz| {
                quiz.validate(QUIZ_QUESTION_COUNT as usize)?;
                Ok(quiz)
            });

        let mut state = self.state.write().await;
        if state.quiz_epoch != issued_epoch {
            tracing::debug!("dropping quiz for a workflow that was reset");
            return Ok(());
        }

        match result {
            Ok(quiz) => {
                tracing::info!(pages = ?pages, "quiz ready");
                state.quiz.status = QuizStatus::Ready(quiz);
            }
            Err(err) => {
                tracing::warn!(%err, "quiz generation failed");
                state.quiz.status = QuizStatus::Failed {
                    message: err.to_string(),
                };
            }
        }
        Ok(())
    }

    /// Discards the rendered quiz: back to `Idle`, selection cleared.
    pub async fn discard_quiz(&self) {
        let mut state = self.state.write().await;
        state.reset_quiz();
    }

    /// Closes the quiz modal, resetting the whole workflow regardless of its
    /// current status.
    pub async fn close_quiz(&self) {
        let mut state = self.state.write().await;
        state.reset_quiz();
    }
}
