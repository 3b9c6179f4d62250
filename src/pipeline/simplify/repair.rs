//! Repair cascade for model replies. Models wrap JSON in prose, code fences
//! and BOMs; each step strips one layer. Order matters and garbage must
//! never panic — the worst case is a typed recovery failure that the caller
//! turns into a raw-text fallback.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::SimplificationResult;
use crate::models::GlossaryTerm;

#[derive(Debug, thiserror::Error)]
#[error("could not recover JSON from model reply")]
pub struct RepairError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReply {
    #[serde(default)]
    simplified_text: Option<String>,
    #[serde(default)]
    glossary: Option<serde_json::Value>,
}

/// Try to pull a [`SimplificationResult`] out of a raw model reply.
///
/// Priority order:
/// 1. strip BOM and whitespace;
/// 2. if not already valid JSON, cut to the first `{` .. last `}` region;
/// 3. strip ```/```json fences;
/// 4. parse as JSON;
/// 5. regex-recover the `simplifiedText` field with an empty glossary.
pub fn recover(raw: &str) -> Result<SimplificationResult, RepairError> {
    let mut cleaned = raw.trim_start_matches('\u{feff}').trim().to_string();

    if serde_json::from_str::<serde_json::Value>(&cleaned).is_err() {
        if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
            if start < end {
                cleaned = cleaned[start..=end].to_string();
            }
        }
    }

    cleaned = strip_fences(&cleaned);

    if let Ok(reply) = serde_json::from_str::<RawReply>(&cleaned) {
        // A missing simplifiedText maps to empty; the caller substitutes
        // its default message.
        return Ok(SimplificationResult {
            simplified_text: reply.simplified_text.unwrap_or_default(),
            glossary: coerce_glossary(reply.glossary),
        });
    }

    // Last resort: the field is there but the JSON around it is broken.
    static FIELD_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#""simplifiedText"\s*:\s*"([^"]+)""#).expect("valid regex"));
    if let Some(captures) = FIELD_RE.captures(raw) {
        return Ok(SimplificationResult {
            simplified_text: captures[1].to_string(),
            glossary: Vec::new(),
        });
    }

    Err(RepairError)
}

/// Degraded result when nothing could be recovered: the raw reply becomes
/// the simplified text, flagged by a single glossary note.
pub fn fallback(raw: &str) -> SimplificationResult {
    SimplificationResult {
        simplified_text: raw.trim().to_string(),
        glossary: vec![GlossaryTerm {
            term: "Note".to_string(),
            definition:
                "The AI model returned text instead of a structured glossary. Please review the simplified text above."
                    .to_string(),
        }],
    }
}

fn strip_fences(text: &str) -> String {
    let mut out = text.trim();
    if let Some(rest) = out.strip_prefix("```json") {
        out = rest;
    } else if let Some(rest) = out.strip_prefix("```") {
        out = rest;
    }
    if let Some(rest) = out.strip_suffix("```") {
        out = rest;
    }
    out.trim().to_string()
}

/// Glossary entries come back in all shapes; keep the well-formed ones and
/// drop the rest, coercing anything that is not an array to empty.
fn coerce_glossary(value: Option<serde_json::Value>) -> Vec<GlossaryTerm> {
    match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<GlossaryTerm>(item).ok())
            .filter(|entry| !entry.term.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
