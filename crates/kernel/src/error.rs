//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::content::ValidationVerdict;

/// Reasons submitted content can fail validation.
///
/// The `Display` text of each variant is what ends up in
/// [`ValidationVerdict::errors`], so it is written for authors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("content must not be empty")]
    EmptyContent,

    #[error("content exceeds the maximum length of {max} characters (got {actual})")]
    ContentTooLarge { max: usize, actual: usize },

    #[error("content contains potentially unsafe patterns: {}", .patterns.join(", "))]
    UnsafeContent { patterns: Vec<&'static str> },
}

/// Content that failed validation and was never rendered.
#[derive(Debug, Clone, Error)]
#[error("{}", .verdict.errors().join("; "))]
pub struct ContentRejected {
    verdict: ValidationVerdict,
}

impl ContentRejected {
    pub(crate) fn new(verdict: ValidationVerdict) -> Self {
        Self { verdict }
    }

    /// The failing verdict.
    pub fn verdict(&self) -> &ValidationVerdict {
        &self.verdict
    }

    pub fn into_verdict(self) -> ValidationVerdict {
        self.verdict
    }
}

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("content rejected: {0}")]
    ContentRejected(#[from] ContentRejected),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
                    .into_response()
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, format!("bad request: {msg}")).into_response()
            }
            // Body is the verdict: `{ "isValid": false, "errors": [...] }`.
            AppError::ContentRejected(rejected) => {
                (StatusCode::BAD_REQUEST, Json(rejected.into_verdict())).into_response()
            }
        }
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn content_error_messages() {
        assert_eq!(
            ContentError::EmptyContent.to_string(),
            "content must not be empty"
        );
        assert_eq!(
            ContentError::ContentTooLarge {
                max: 10,
                actual: 11
            }
            .to_string(),
            "content exceeds the maximum length of 10 characters (got 11)"
        );
        assert_eq!(
            ContentError::UnsafeContent {
                patterns: vec!["script block", "iframe tag"]
            }
            .to_string(),
            "content contains potentially unsafe patterns: script block, iframe tag"
        );
    }

    #[test]
    fn status_codes() {
        let resp = AppError::BadRequest("nope".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
