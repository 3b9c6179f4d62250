//! POST /api/simplify — the full upload-to-simplified pipeline.

use std::io::Write;

use axum::extract::State;
use axum::Json;
use base64::Engine;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::config::MAX_UPLOAD_BYTES;
use crate::language::SupportedLanguage;
use crate::models::{NewDocument, SimplifyResponse};
use crate::pipeline::extraction::{extract_document, ExtractionError};
use crate::pipeline::simplify::{simplify_text, SimplifyError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyRequest {
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

enum PipelineFailure {
    Extraction(ExtractionError),
    Simplify(SimplifyError),
}

pub async fn simplify(
    State(state): State<AppState>,
    Json(request): Json<SimplifyRequest>,
) -> Result<Json<SimplifyResponse>, ApiError> {
    let encoded = request.image_base64.as_deref().unwrap_or("").trim();
    if encoded.is_empty() {
        return Err(ApiError::BadRequest("No file uploaded".to_string()));
    }

    let language = match request.language.as_deref() {
        None | Some("") => SupportedLanguage::En,
        Some(code) => SupportedLanguage::from_code(code)
            .ok_or_else(|| ApiError::BadRequest(format!("Unsupported language code: {code}")))?,
    };

    let (declared_mime, payload) = split_data_url(encoded);

    // Size gate from the base64 length, before decoding or touching OCR.
    let estimated_bytes = payload.len() / 4 * 3;
    if estimated_bytes > MAX_UPLOAD_BYTES {
        return Err(ApiError::BadRequest(
            "File too large. Maximum size is 8MB.".to_string(),
        ));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| ApiError::BadRequest("Invalid base64 image data".to_string()))?;

    let mime = match declared_mime {
        Some(m) if m != "application/octet-stream" => m.to_string(),
        _ => sniff_mime(&bytes).to_string(),
    };
    if !mime.starts_with("image/") && mime != "application/pdf" {
        return Err(ApiError::BadRequest(
            "Unsupported file type. Only JPG, PNG, and PDF files are allowed.".to_string(),
        ));
    }

    tracing::info!(
        mime = %mime,
        language = %language,
        size = bytes.len(),
        "processing simplify request"
    );

    let ocr = state.ocr.clone();
    let chat = state.chat.clone();
    let suffix = extension_for(&mime);
    let pipeline_mime = mime.clone();

    let outcome = tokio::task::spawn_blocking(move || {
        // NamedTempFile deletes on drop, covering every exit path below.
        let mut file = tempfile::Builder::new()
            .prefix("saraldocs-")
            .suffix(suffix)
            .tempfile()
            .map_err(|e| PipelineFailure::Extraction(ExtractionError::Io(e)))?;
        file.write_all(&bytes)
            .map_err(|e| PipelineFailure::Extraction(ExtractionError::Io(e)))?;

        let text = extract_document(file.path(), &pipeline_mime, language, ocr.as_ref())
            .map_err(PipelineFailure::Extraction)?;
        let result =
            simplify_text(chat.as_ref(), &text, language).map_err(PipelineFailure::Simplify)?;
        Ok((text, result))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("pipeline task failed: {e}")))?;

    let (original_text, result) = outcome.map_err(|failure| match failure {
        PipelineFailure::Extraction(e) => ApiError::from(e),
        PipelineFailure::Simplify(e) => ApiError::from_simplify(e),
    })?;

    // Persistence is best-effort: the user still gets their result if the
    // save fails.
    match state.storage.save_document(NewDocument {
        original_text: original_text.clone(),
        simplified_text: Some(result.simplified_text.clone()),
        target_language: language,
        glossary: result.glossary.clone(),
        file_name: request.file_name.clone(),
    }) {
        Ok(doc) => tracing::info!(document_id = %doc.id, "document saved"),
        Err(e) => tracing::warn!(error = %e, "failed to save document, returning result anyway"),
    }

    Ok(Json(SimplifyResponse {
        original_text,
        simplified_text: result.simplified_text,
        glossary: result.glossary,
        target_language: language,
    }))
}

/// Split a `data:<mime>;base64,<payload>` URL. Raw base64 without the
/// prefix is accepted too, with the MIME sniffed from the bytes later.
fn split_data_url(encoded: &str) -> (Option<&str>, &str) {
    if let Some(rest) = encoded.strip_prefix("data:") {
        if let Some((header, payload)) = rest.split_once(',') {
            let mime = header.split(';').next().unwrap_or("");
            let mime = if mime.is_empty() { None } else { Some(mime) };
            return (mime, payload);
        }
    }
    (None, encoded)
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"%PDF") {
        "application/pdf"
    } else if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else {
        "application/octet-stream"
    }
}

fn extension_for(mime: &str) -> &'static str {
    match mime {
        "application/pdf" => ".pdf",
        "image/png" => ".png",
        _ => ".jpg",
    }
}
