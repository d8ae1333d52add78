//! Per-page state: explanation lifecycle and the rendered page image.

use crate::error::{Result, StudyError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

/// The AI-generated explanation of one page, together with the raw text the
/// backend extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// Natural-language explanation in the session language.
    pub text: String,
    /// Raw text extracted from the page.
    pub raw_text: String,
}

/// Lifecycle of the explanation for the currently active page.
///
/// Owned exclusively by the active page: any page change destroys this state
/// back to `NotRequested`. `Failed` is retriable; `Ready` can only be left by
/// changing the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ExplanationState {
    /// No explanation has been requested for this page.
    #[default]
    NotRequested,
    /// An explanation request is in flight.
    Loading,
    /// The explanation arrived.
    Ready(Explanation),
    /// The last request failed; the message is surfaced for retry.
    Failed {
        message: String,
    },
}

impl ExplanationState {
    /// Check if an explanation is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Check if a request is currently in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// A renderable image of one page, as the data URI the backend serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageImage {
    /// Data URI, e.g. `data:image/png;base64,...`.
    pub data_uri: String,
}

impl PageImage {
    /// Wraps a backend-provided data URI.
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self {
            data_uri: data_uri.into(),
        }
    }

    /// Decodes the base64 payload of the data URI into raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the string is not a base64 data URI.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        let payload = self
            .data_uri
            .split_once(";base64,")
            .map(|(_, rest)| rest)
            .ok_or_else(|| StudyError::malformed("page image is not a base64 data URI"))?;

        BASE64_STANDARD
            .decode(payload)
            .map_err(|e| StudyError::malformed(format!("invalid base64 in page image: {}", e)))
    }
}

/// The active page as the presentation layer sees it: its number, the cached
/// image (if fetched), and its explanation lifecycle. Exactly one `PageView`
/// is active at a time; navigating replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    /// 1-indexed page number, bounded by `[1, total_pages]`.
    pub number: u32,
    /// Cached page image, if the fetch has completed.
    pub image: Option<PageImage>,
    /// Explanation lifecycle for this page.
    pub explanation: ExplanationState,
}

impl PageView {
    /// Creates the fresh view for a page that was just navigated to.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            image: None,
            explanation: ExplanationState::NotRequested,
        }
    }
}
