//! Simplification: prompt construction, the chat-completion call, and repair
//! of whatever the model sends back.

pub mod chunk;
pub mod llm;
pub mod prompt;
pub mod repair;

pub use llm::{ChatClient, GroqClient};

use crate::language::SupportedLanguage;
use crate::models::GlossaryTerm;

/// Output token budget for inputs up to [`LARGE_INPUT_THRESHOLD`] chars.
pub const MAX_TOKENS_STANDARD: u32 = 7_000;
/// Output token budget for larger inputs (provider cap).
pub const MAX_TOKENS_LARGE: u32 = 12_000;
pub const LARGE_INPUT_THRESHOLD: usize = 15_000;
/// Inputs past this size get a warning log; they often blow the context.
pub const WARN_INPUT_CHARS: usize = 50_000;

#[derive(Debug, thiserror::Error)]
pub enum SimplifyError {
    #[error("GROQ_API_KEY is not configured")]
    MissingApiKey,
    #[error("Could not connect to the language model service: {0}")]
    Connection(String),
    #[error("Language model request timed out after {0} seconds")]
    Timeout(u64),
    #[error("Language model API error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("Failed to send request to the language model: {0}")]
    Request(String),
    /// Carries the raw response body so the API layer can surface an
    /// excerpt for diagnostics.
    #[error("The language model returned an empty response")]
    EmptyResponse { raw: String },
}

/// What the model is asked to produce: a rewrite plus a glossary.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplificationResult {
    pub simplified_text: String,
    pub glossary: Vec<GlossaryTerm>,
}

/// Run the extracted text through the model and repair the reply. Garbage
/// model output degrades to a fallback result; only transport failures and
/// an empty reply surface as errors.
pub fn simplify_text(
    client: &dyn ChatClient,
    text: &str,
    language: SupportedLanguage,
) -> Result<SimplificationResult, SimplifyError> {
    let input_chars = text.chars().count();
    if input_chars > WARN_INPUT_CHARS {
        tracing::warn!(chars = input_chars, "very large document, model may truncate");
    }

    let max_tokens = if input_chars > LARGE_INPUT_THRESHOLD {
        MAX_TOKENS_LARGE
    } else {
        MAX_TOKENS_STANDARD
    };

    let system = prompt::system_prompt(language);
    let user = prompt::user_prompt(language, text);

    let raw = client.complete(&system, &user, max_tokens)?;
    if raw.trim().is_empty() {
        return Err(SimplifyError::EmptyResponse { raw });
    }

    let mut result = match repair::recover(&raw) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "model reply unrecoverable, returning raw text");
            repair::fallback(&raw)
        }
    };

    if result.simplified_text.trim().is_empty() {
        result.simplified_text = "Unable to simplify the document.".to_string();
    }

    tracing::info!(
        language = %language,
        glossary_terms = result.glossary.len(),
        "simplification complete"
    );
    Ok(result)
}
