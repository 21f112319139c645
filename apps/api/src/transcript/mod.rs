//! Interview transcripts: the raw chat-turn records we retrieve from the voice
//! platform, the sanitized form we hand to the prompt builder, and the
//! retrieval seam itself.
//!
//! `TranscriptSource` is carried in `AppState` as `Arc<dyn TranscriptSource>`;
//! the default backend is `HumeClient`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod hume;
pub mod sanitizer;

pub use sanitizer::{sanitize_emotion_features, sanitize_transcript, truncate, TranscriptLimits};

// ────────────────────────────────────────────────────────────────────────────
// Raw turns (collaborator input)
// ────────────────────────────────────────────────────────────────────────────

/// Event tag attached to every chat turn by the retrieval service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnType {
    UserMessage,
    AgentMessage,
    SystemPrompt,
    UserInterruption,
    ChatEndMessage,
    PauseOnset,
    ResumeOnset,
    FunctionCall,
    FunctionCallResponse,
    #[serde(other)]
    Other,
}

/// A single chat turn exactly as retrieved. Every field past `type` is optional
/// because the sanitizer degrades by omission rather than rejecting turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChatTurn {
    #[serde(rename = "type")]
    pub turn_type: TurnType,
    #[serde(default, alias = "message_text", rename = "messageText")]
    pub message_text: Option<String>,
    /// Either a JSON object or a string containing one.
    #[serde(default, alias = "emotion_features", rename = "emotionFeatures")]
    pub emotion_features: Option<serde_json::Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Sanitized transcript (prompt input)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Interviewee,
    Interviewer,
}

/// A normalized transcript message passed to the model as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMessage {
    pub speaker: Speaker,
    pub text: String,
    /// Present only for interviewee turns with at least one valid feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_features: Option<BTreeMap<String, f64>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Retrieval seam
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat {0} not found")]
    NotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid chat id: {0}")]
    InvalidChatId(String),

    #[error("Invalid transcript service URL: {0}")]
    InvalidUrl(String),
}

/// Fetches the ordered chat turns for an opaque chat identifier.
///
/// Implementations must not retry; failures go back to the caller untouched.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, chat_id: &str) -> Result<Vec<RawChatTurn>, TranscriptError>;
}
