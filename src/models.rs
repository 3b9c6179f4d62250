//! Wire and storage types. Field names serialize in camelCase to match the
//! public API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::SupportedLanguage;

/// One glossary entry in a simplified document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
}

/// A processed document as stored and returned by the API. Immutable once
/// created; there is no update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub original_text: String,
    pub simplified_text: Option<String>,
    pub target_language: SupportedLanguage,
    pub glossary: Vec<GlossaryTerm>,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    /// created_at + 7 days. Advisory: nothing purges expired documents.
    pub expires_at: DateTime<Utc>,
}

/// Fields supplied when persisting a freshly simplified document.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub original_text: String,
    pub simplified_text: Option<String>,
    pub target_language: SupportedLanguage,
    pub glossary: Vec<GlossaryTerm>,
    pub file_name: Option<String>,
}

/// User feedback, at least ten characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Body of a successful simplify call, and the input to both export
/// renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyResponse {
    pub original_text: String,
    pub simplified_text: String,
    pub glossary: Vec<GlossaryTerm>,
    pub target_language: SupportedLanguage,
}
