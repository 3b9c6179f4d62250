//! Suggestion endpoints: user feedback, minimum ten characters.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::config::MIN_SUGGESTION_CHARS;
use crate::models::Suggestion;

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /api/suggestions
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<Suggestion>, ApiError> {
    let message = request.message.as_deref().unwrap_or("").trim();
    if message.chars().count() < MIN_SUGGESTION_CHARS {
        return Err(ApiError::BadRequest(
            "Suggestion must be at least 10 characters long".to_string(),
        ));
    }

    let suggestion = state.storage.create_suggestion(message)?;
    tracing::info!(suggestion_id = %suggestion.id, "suggestion recorded");
    Ok(Json(suggestion))
}

/// GET /api/suggestions
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let suggestions = state.storage.list_suggestions()?;
    Ok(Json(suggestions))
}
