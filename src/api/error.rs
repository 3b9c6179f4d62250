//! API error type with HTTP status mapping. Bodies are a flat
//! `{"message": "..."}` object.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::extraction::ExtractionError;
use crate::pipeline::simplify::SimplifyError;
use crate::storage::StorageError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Chat-completion failure, message already remapped for users.
    #[error("{0}")]
    Upstream(String),
    /// The model replied with nothing usable at all.
    #[error("Failed to parse AI response. The model may have returned an error. {excerpt}")]
    Parse { excerpt: String },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a pipeline failure to a user-facing message. Provider errors
    /// mentioning rate limits or token budgets get friendlier wording.
    pub fn from_simplify(err: SimplifyError) -> Self {
        match err {
            SimplifyError::EmptyResponse { raw } => ApiError::parse_with_excerpt(&raw),
            other => {
                let raw = other.to_string();
                if raw.contains("rate_limit") {
                    ApiError::Upstream(
                        "API rate limit reached. Please wait a moment and try again.".to_string(),
                    )
                } else if raw.contains("token") {
                    ApiError::Upstream(
                        "Document is too large to process. Please upload a smaller document."
                            .to_string(),
                    )
                } else {
                    ApiError::Upstream(format!("Failed to simplify document: {raw}"))
                }
            }
        }
    }

    /// Keep at most 200 chars of raw model output for diagnostics.
    pub fn parse_with_excerpt(raw: &str) -> Self {
        ApiError::Parse { excerpt: raw.chars().take(200).collect() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.clone()),
            ApiError::Upstream(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail.clone()),
            ApiError::Parse { .. } => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        // Extraction failures are the user's upload, not our fault.
        ApiError::BadRequest(err.to_string())
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
