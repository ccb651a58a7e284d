//! Groq API request and response types.
//!
//! These map directly onto the OpenAI-compatible wire format and stay
//! internal to the client.

use serde::{Deserialize, Serialize};

use crate::usage::Usage;

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GroqChatRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Message on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GroqMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<GroqContent>,
}

/// Message content variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum GroqContent {
    Text(String),
    Array(Vec<GroqContentPart>),
}

/// Content part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum GroqContentPart {
    Text { text: String },
    ImageUrl { image_url: GroqImageUrl },
}

/// Image reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GroqImageUrl {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GroqChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<GroqChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Response choice.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GroqChoice {
    pub message: GroqResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response message.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GroqResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GroqErrorResponse {
    pub error: GroqError,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GroqError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Transcription response (`json` or `verbose_json`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GroqTranscriptionResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<f32>,
}
