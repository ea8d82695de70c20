//! Chat-proxy abstraction.
//!
//! The screening service forwards free-text patient messages to an external
//! generative-AI endpoint and returns its text reply. The rest of the system
//! depends only on the [`ChatBackend`] trait (message in, text out), never on
//! a vendor SDK: the concrete backend is chosen at startup and injected as a
//! trait object.
//!
//! Two implementations are provided:
//! - [`GenerativeLanguageBackend`] posts to a Gemini-style `generateContent`
//!   HTTP endpoint.
//! - [`DisabledBackend`] stands in when no API key is configured, so the
//!   server still boots and the chat route reports the backend as absent.

#![warn(rust_2018_idioms)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default endpoint of the generative-language API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model asked for replies.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("no chat backend is configured")]
    NotConfigured,
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat endpoint returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
    #[error("chat endpoint returned no reply text")]
    EmptyReply,
}

/// An opaque message-in, text-out conversational endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Forward one free-text message and return the reply text.
    async fn send(&self, message: &str) -> Result<String, ChatError>;
}

/// Backend used when no API key is configured.
///
/// Always fails with [`ChatError::NotConfigured`]; the API layer maps this to
/// a service-unavailable response instead of refusing to boot.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledBackend;

#[async_trait]
impl ChatBackend for DisabledBackend {
    async fn send(&self, _message: &str) -> Result<String, ChatError> {
        Err(ChatError::NotConfigured)
    }
}

/// HTTP client for a Gemini-style `generateContent` endpoint.
pub struct GenerativeLanguageBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GenerativeLanguageBackend {
    /// Create a backend against the default endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model)
    }

    /// Create a backend against a custom endpoint (tests, self-hosted proxies).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl ChatBackend for GenerativeLanguageBackend {
    async fn send(&self, message: &str) -> Result<String, ChatError> {
        let body = GenerateContentReq {
            contents: vec![Content {
                parts: vec![Part { text: message }],
            }],
        };

        // The API key travels in a header, never in the URL.
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("generative endpoint returned {}", status);
            return Err(ChatError::UpstreamStatus(status));
        }

        let reply: GenerateContentRes = response.json().await?;
        let text = reply.text();
        if text.trim().is_empty() {
            return Err(ChatError::EmptyReply);
        }
        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateContentReq<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentRes {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentRes {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: String,
}
