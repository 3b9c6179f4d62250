//! Document CRD endpoints. Documents are immutable; there is no update.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::config::DOCUMENT_LIST_LIMIT;
use crate::models::Document;

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllResponse {
    pub success: bool,
    pub deleted_count: usize,
}

/// GET /api/documents — newest first, capped at 50.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let documents = state.storage.list_documents(DOCUMENT_LIST_LIMIT)?;
    Ok(Json(documents))
}

/// GET /api/documents/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    match state.storage.get_document(&id)? {
        Some(document) => Ok(Json(document)),
        None => Err(ApiError::NotFound("Document not found".to_string())),
    }
}

/// DELETE /api/documents/:id — succeeds whether or not the id exists.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.storage.delete_document(&id)?;
    tracing::info!(document_id = %id, "document deleted");
    Ok(Json(DeleteResponse { success: true }))
}

/// DELETE /api/documents — clears the store, reporting how many went.
pub async fn delete_all(
    State(state): State<AppState>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let mut deleted = 0;
    loop {
        let batch = state.storage.list_documents(1000)?;
        if batch.is_empty() {
            break;
        }
        for document in &batch {
            state.storage.delete_document(&document.id.to_string())?;
            deleted += 1;
        }
    }
    tracing::info!(deleted, "cleared all documents");
    Ok(Json(DeleteAllResponse { success: true, deleted_count: deleted }))
}
