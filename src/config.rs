//! Service configuration, read from the environment once at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Maximum decoded upload size (8 MB). Checked before decoding from the
/// base64 length estimate, so oversized payloads never reach OCR.
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Extracted text shorter than this is treated as "no readable text".
pub const MIN_EXTRACTED_CHARS: usize = 10;

/// Document listings return at most this many records, newest first.
pub const DOCUMENT_LIST_LIMIT: usize = 50;

/// Stored documents advertise an expiry this many days after creation.
/// Advisory only: nothing purges expired documents.
pub const DOCUMENT_EXPIRY_DAYS: i64 = 7;

/// Minimum suggestion message length, in characters.
pub const MIN_SUGGESTION_CHARS: usize = 10;

/// Runtime configuration. Built once in `main` and handed to the router
/// state; nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// API key for the chat-completion provider. Missing key fails the
    /// simplify call, not startup, so read-only endpoints keep working.
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    /// SQLite path; unset means the in-memory store.
    pub db_path: Option<PathBuf>,
    /// Directory searched for Noto fonts used by the export renderers.
    pub fonts_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            groq_api_key: None,
            groq_base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            request_timeout_secs: 300,
            db_path: None,
            fonts_dir: PathBuf::from("fonts"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            groq_api_key: std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.groq_base_url),
            model: std::env::var("GROQ_MODEL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.model),
            request_timeout_secs: std::env::var("GROQ_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            db_path: std::env::var("SARALDOCS_DB_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            fonts_dir: std::env::var("SARALDOCS_FONTS_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.fonts_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.bind_addr.port(), 5000);
        assert!(cfg.groq_api_key.is_none());
        assert!(cfg.groq_base_url.starts_with("https://"));
        assert!(cfg.db_path.is_none());
    }
}
