//! Export endpoints. The client posts a simplify result back and gets a
//! binary attachment.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::export::{render_pdf, render_png, ExportError};
use crate::models::SimplifyResponse;

/// POST /api/download/pdf
pub async fn pdf(
    State(state): State<AppState>,
    Json(result): Json<SimplifyResponse>,
) -> Result<Response, ApiError> {
    let fonts_dir = state.config.fonts_dir.clone();
    let bytes = tokio::task::spawn_blocking(move || render_pdf(&result, &fonts_dir))
        .await
        .map_err(|e| ApiError::Internal(format!("render task failed: {e}")))?
        .map_err(export_error)?;

    attachment(bytes, "application/pdf", "simplified-document.pdf")
}

/// POST /api/download/image
pub async fn image(
    State(state): State<AppState>,
    Json(result): Json<SimplifyResponse>,
) -> Result<Response, ApiError> {
    if result.simplified_text.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "No simplified text available to download".to_string(),
        ));
    }

    let fonts_dir = state.config.fonts_dir.clone();
    let bytes = tokio::task::spawn_blocking(move || render_png(&result, &fonts_dir))
        .await
        .map_err(|e| ApiError::Internal(format!("render task failed: {e}")))?
        .map_err(export_error)?;

    attachment(bytes, "image/png", "simplified-document.png")
}

fn export_error(err: ExportError) -> ApiError {
    tracing::error!(error = %err, "export rendering failed");
    ApiError::Internal(err.to_string())
}

fn attachment(bytes: Vec<u8>, content_type: &str, file_name: &str) -> Result<Response, ApiError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .body(axum::body::Body::from(bytes))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
