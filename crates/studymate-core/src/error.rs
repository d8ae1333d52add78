//! Error types for the StudyMate application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire StudyMate application.
///
/// Service failures fall into three wire-level categories: the request never
/// completed (`Network`), the backend answered with a non-success status
/// (`Server`), or the backend answered successfully but the body could not be
/// interpreted (`MalformedResponse`). The remaining variants cover workflow
/// preconditions that are checked before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudyError {
    /// The request never completed (connection refused, DNS failure, timeout).
    #[error("network failure: {message}")]
    Network { message: String },

    /// The backend returned a non-success status code.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The backend returned a success status but the body was unparseable
    /// or missing expected fields.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The caller supplied input that is rejected before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The operation is not allowed in the current workflow state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not happen in normal operation).
    #[error("internal error: {0}")]
    Internal(String),
}

impl StudyError {
    /// Creates a Network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a Server error.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an InvalidState error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Network error.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Check if this is a Server error.
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Check if this is a MalformedResponse error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Check if retrying the same operation could succeed.
    ///
    /// All wire-level failures are retriable; precondition violations are not.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Server { .. } | Self::MalformedResponse(_)
        )
    }
}

impl From<reqwest::Error> for StudyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for StudyError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// A type alias for `Result<T, StudyError>`.
pub type Result<T> = std::result::Result<T, StudyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_classification() {
        assert!(StudyError::network("connection refused").is_retriable());
        assert!(StudyError::server(500, "boom").is_retriable());
        assert!(StudyError::malformed("missing field").is_retriable());
        assert!(!StudyError::invalid_input("blank question").is_retriable());
        assert!(!StudyError::invalid_state("already explained").is_retriable());
    }

    #[test]
    fn test_display_includes_status() {
        let err = StudyError::server(404, "PDF not found");
        assert_eq!(err.to_string(), "server error (404): PDF not found");
    }
}
