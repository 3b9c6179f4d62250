//! Chat-completion client. Blocking reqwest against an OpenAI-compatible
//! `/chat/completions` endpoint; always called from `spawn_blocking`.

use serde::{Deserialize, Serialize};

use super::SimplifyError;
use crate::config::AppConfig;

pub trait ChatClient: Send + Sync {
    /// One completion round-trip. Returns the assistant message content.
    fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String, SimplifyError>;
}

pub struct GroqClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
    http: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl GroqClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, SimplifyError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SimplifyError::Request(e.to_string()))?;

        Ok(Self {
            base_url: config.groq_base_url.trim_end_matches('/').to_string(),
            api_key: config.groq_api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.request_timeout_secs,
            http,
        })
    }
}

impl ChatClient for GroqClient {
    fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String, SimplifyError> {
        let api_key = self.api_key.as_deref().ok_or(SimplifyError::MissingApiKey)?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            // Deterministic output keeps the JSON contract as tight as the
            // model allows.
            temperature: 0.0,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %self.model, max_tokens, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    SimplifyError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    SimplifyError::Connection(e.to_string())
                } else {
                    SimplifyError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SimplifyError::Api { status: status.as_u16(), body });
        }

        // Keep the raw body around: if the envelope has no usable content
        // the error reports an excerpt of what actually came back.
        let raw = response
            .text()
            .map_err(|e| SimplifyError::Request(e.to_string()))?;
        let parsed: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| SimplifyError::Request(format!("invalid completion response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(SimplifyError::EmptyResponse { raw });
        }
        Ok(content)
    }
}

/// Scripted client for tests: returns a fixed reply and records the last
/// requested token budget.
pub struct MockChatClient {
    reply: std::sync::Mutex<Result<String, String>>,
    last_max_tokens: std::sync::Mutex<Option<u32>>,
}

impl MockChatClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: std::sync::Mutex::new(Ok(reply.to_string())),
            last_max_tokens: std::sync::Mutex::new(None),
        }
    }

    /// A client whose call fails with an API error carrying `body`.
    pub fn failing_with(body: &str) -> Self {
        Self {
            reply: std::sync::Mutex::new(Err(body.to_string())),
            last_max_tokens: std::sync::Mutex::new(None),
        }
    }

    pub fn last_max_tokens(&self) -> Option<u32> {
        *self.last_max_tokens.lock().unwrap()
    }
}

impl ChatClient for MockChatClient {
    fn complete(
        &self,
        _system: &str,
        _user: &str,
        max_tokens: u32,
    ) -> Result<String, SimplifyError> {
        *self.last_max_tokens.lock().unwrap() = Some(max_tokens);
        match &*self.reply.lock().unwrap() {
            Ok(reply) => Ok(reply.clone()),
            Err(body) => Err(SimplifyError::Api { status: 429, body: body.clone() }),
        }
    }
}
