//! StudyMateApiClient - REST client for the StudyMate backend.
//!
//! Implements every service trait from `studymate-core` against the backend's
//! JSON contracts. Configuration priority: ~/.config/studymate/config.json >
//! environment variables > built-in default.

use crate::config::load_api_config;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use studymate_core::document::Document;
use studymate_core::error::{Result, StudyError};
use studymate_core::language::Language;
use studymate_core::page::{Explanation, PageImage};
use studymate_core::quiz::Quiz;
use studymate_core::services::{
    DocumentRegistry, DoubtAnswerService, ExplanationService, PageImageProvider, QuizService,
};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Timeout for metadata lookups (document info, page images).
const METADATA_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for AI-generation calls (explanation, doubt, quiz).
const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// REST client for the StudyMate backend.
#[derive(Clone)]
pub struct StudyMateApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PdfInfoResponse {
    #[serde(rename = "fileName")]
    file_name: Option<String>,
    #[serde(rename = "totalPages")]
    total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PageImageResponse {
    image: Option<String>,
}

#[derive(Debug, Serialize)]
struct ParsePageRequest<'a> {
    pdf_id: &'a str,
    page_no: u32,
    language: Language,
}

#[derive(Debug, Deserialize)]
struct ParsePageResponse {
    explanation: Option<String>,
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct AskDoubtRequest<'a> {
    pdf_id: &'a str,
    page_no: u32,
    query: &'a str,
    language: Language,
}

#[derive(Debug, Deserialize)]
struct AskDoubtResponse {
    answer: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateQuizRequest<'a> {
    pdf_id: &'a str,
    page_numbers: &'a [u32],
    language: Language,
    num_questions: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateQuizResponse {
    quiz: Option<Quiz>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    pdf_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

impl StudyMateApiClient {
    /// Creates a new client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Loads the base URL from ~/.config/studymate/config.json or environment
    /// variables.
    ///
    /// Priority:
    /// 1. ~/.config/studymate/config.json (`base_url`)
    /// 2. `STUDYMATE_API_URL` environment variable
    ///
    /// Defaults to `http://localhost:5000` if neither is set.
    pub fn try_from_env() -> Self {
        let base_url = load_api_config()
            .ok()
            .and_then(|config| config.base_url)
            .or_else(|| env::var("STUDYMATE_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(base_url)
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Uploads a PDF, returning the backend identifier used to enter a study
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `Server`, or `MalformedResponse` depending on how
    /// the call failed.
    pub async fn upload_pdf(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: UploadResponse = response.json().await?;
        body.pdf_id
            .ok_or_else(|| StudyError::malformed("upload response has no pdf_id"))
    }
}

/// Converts a non-success response into a `Server` error, using the backend's
/// `{error}` payload when present.
async fn error_from_response(response: Response) -> StudyError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.error)
        .unwrap_or(body);

    StudyError::server(status, message)
}

#[async_trait]
impl DocumentRegistry for StudyMateApiClient {
    async fn fetch_document(&self, pdf_id: &str) -> Result<Document> {
        let response = self
            .client
            .get(format!("{}/pdf/{}", self.base_url, pdf_id))
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: PdfInfoResponse = response.json().await?;
        Ok(Document::new(
            pdf_id,
            body.file_name.unwrap_or_else(|| "Unknown PDF".to_string()),
            body.total_pages.unwrap_or(1),
        ))
    }
}

#[async_trait]
impl PageImageProvider for StudyMateApiClient {
    async fn fetch_page_image(&self, pdf_id: &str, page_no: u32) -> Result<PageImage> {
        let response = self
            .client
            .get(format!(
                "{}/pdf/{}/page/{}/image",
                self.base_url, pdf_id, page_no
            ))
            .timeout(METADATA_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: PageImageResponse = response.json().await?;
        body.image
            .map(PageImage::new)
            .ok_or_else(|| StudyError::malformed("page image response has no image"))
    }
}

#[async_trait]
impl ExplanationService for StudyMateApiClient {
    async fn explain_page(
        &self,
        pdf_id: &str,
        page_no: u32,
        language: Language,
    ) -> Result<Explanation> {
        tracing::debug!(pdf_id, page_no, %language, "requesting page explanation");

        let response = self
            .client
            .post(format!("{}/parse-page", self.base_url))
            .json(&ParsePageRequest {
                pdf_id,
                page_no,
                language,
            })
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        // The backend occasionally answers with a non-JSON body (proxy error
        // pages); read the text first so that case maps to MalformedResponse
        // instead of a decode panic deeper in the stack.
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|parsed| parsed.error)
                .unwrap_or(text);
            return Err(StudyError::server(status.as_u16(), message));
        }

        let body: ParsePageResponse = serde_json::from_str(&text)
            .map_err(|_| StudyError::malformed("server returned a non-JSON response"))?;

        let explanation = body
            .explanation
            .ok_or_else(|| StudyError::malformed("parse-page response has no explanation"))?;

        Ok(Explanation {
            text: explanation,
            raw_text: body.text.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl DoubtAnswerService for StudyMateApiClient {
    async fn answer_doubt(
        &self,
        pdf_id: &str,
        page_no: u32,
        query: &str,
        language: Language,
    ) -> Result<String> {
        tracing::debug!(pdf_id, page_no, %language, "asking doubt");

        let response = self
            .client
            .post(format!("{}/ask-doubt", self.base_url))
            .json(&AskDoubtRequest {
                pdf_id,
                page_no,
                query,
                language,
            })
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: AskDoubtResponse = response.json().await?;
        Ok(body
            .answer
            .unwrap_or_else(|| "Unable to generate answer.".to_string()))
    }
}

#[async_trait]
impl QuizService for StudyMateApiClient {
    async fn generate_quiz(
        &self,
        pdf_id: &str,
        pages: &[u32],
        language: Language,
        num_questions: u32,
    ) -> Result<Quiz> {
        tracing::debug!(pdf_id, ?pages, %language, num_questions, "generating quiz");

        let response = self
            .client
            .post(format!("{}/generate-quiz", self.base_url))
            .json(&GenerateQuizRequest {
                pdf_id,
                page_numbers: pages,
                language,
                num_questions,
            })
            .timeout(GENERATION_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: GenerateQuizResponse = response.json().await?;
        body.quiz
            .ok_or_else(|| StudyError::malformed("generate-quiz response has no quiz"))
    }
}
