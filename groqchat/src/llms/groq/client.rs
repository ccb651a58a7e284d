//! Groq API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::chat::ChatRequest;
use crate::error::{LlmError, Result};
use crate::message::{Content, ContentPart, Message};

use super::config::GroqConfig;
use super::types::{
    GroqChatRequest, GroqContent, GroqContentPart, GroqErrorResponse, GroqImageUrl, GroqMessage,
};

pub(crate) const PROVIDER: &str = "groq";

/// Groq API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Groq {
    pub(crate) config: Arc<GroqConfig>,
    pub(crate) client: Client,
}

impl Groq {
    /// Create a new client with the given configuration.
    pub fn new(config: GroqConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::auth(PROVIDER, "API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| LlmError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(GroqConfig::from_env()?)
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &GroqConfig {
        &self.config
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the default chat model.
    #[must_use]
    pub fn chat_model(&self) -> &str {
        &self.config.chat_model
    }

    /// Get the default vision model.
    #[must_use]
    pub fn vision_model(&self) -> &str {
        &self.config.vision_model
    }

    /// Get the default transcription model.
    #[must_use]
    pub fn transcription_model(&self) -> &str {
        &self.config.transcription_model
    }

    /// Build the chat completions URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Build the audio transcriptions URL.
    pub(crate) fn transcriptions_url(&self) -> String {
        format!("{}/audio/transcriptions", self.config.base_url)
    }

    /// POST request with JSON headers.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// POST request for multipart uploads; reqwest sets the boundary header.
    pub(crate) fn build_multipart_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client.post(url).bearer_auth(&self.config.api_key)
    }

    /// Convert a [`Message`] to the wire format.
    pub(crate) fn convert_message(msg: &Message) -> GroqMessage {
        let content = msg.content.as_ref().map(|c| match c {
            Content::Text(text) => GroqContent::Text(text.clone()),
            Content::Parts(parts) => GroqContent::Array(
                parts
                    .iter()
                    .map(|part| match part {
                        ContentPart::Text { text } => GroqContentPart::Text { text: text.clone() },
                        ContentPart::ImageUrl { image_url } => GroqContentPart::ImageUrl {
                            image_url: GroqImageUrl {
                                url: image_url.url.clone(),
                                detail: image_url.detail.map(|d| d.as_str().to_owned()),
                            },
                        },
                    })
                    .collect(),
            ),
        });

        GroqMessage {
            role: msg.role.as_str().to_owned(),
            content,
        }
    }

    /// Build the request body, filling in the default chat model.
    pub(crate) fn build_body(&self, request: &ChatRequest) -> GroqChatRequest {
        let model = if request.model.is_empty() {
            self.config.chat_model.clone()
        } else {
            request.model.clone()
        };

        GroqChatRequest {
            model,
            messages: request.messages.iter().map(Self::convert_message).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            stop: request.stop.clone(),
            user: request.user.clone(),
        }
    }

    /// Parse an error response.
    pub(crate) fn parse_error(status: u16, body: &str) -> LlmError {
        if let Ok(error_response) = serde_json::from_str::<GroqErrorResponse>(body) {
            let error = error_response.error;
            return match status {
                401 => LlmError::auth(PROVIDER, error.message),
                429 => LlmError::rate_limited(PROVIDER),
                _ => LlmError::provider(
                    PROVIDER,
                    status,
                    error.code.or(error.error_type),
                    error.message,
                ),
            };
        }

        LlmError::http_status(status, body.to_owned())
    }

    /// Turn a non-success response into an error, consuming its body.
    pub(crate) async fn error_from_response(response: reqwest::Response) -> LlmError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(provider = PROVIDER, status, body = %body, "API request failed");
        Self::parse_error(status, &body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn test_client() -> Groq {
        Groq::new(GroqConfig::new("test-key")).unwrap()
    }

    #[test]
    fn rejects_empty_key() {
        let err = Groq::new(GroqConfig::new("   ")).unwrap_err();
        assert!(err.to_string().contains("API key is required"));
    }

    #[test]
    fn urls_follow_base() {
        let client = Groq::new(GroqConfig::new("k").with_base_url("http://127.0.0.1:9/v1")).unwrap();
        assert_eq!(client.chat_url(), "http://127.0.0.1:9/v1/chat/completions");
        assert_eq!(
            client.transcriptions_url(),
            "http://127.0.0.1:9/v1/audio/transcriptions"
        );
    }

    #[test]
    fn text_message_conversion() {
        let converted = Groq::convert_message(&Message::user("Hello!"));
        assert_eq!(converted.role, "user");
        assert!(matches!(converted.content, Some(GroqContent::Text(ref t)) if t == "Hello!"));
    }

    #[test]
    fn image_message_conversion() {
        let msg = Message::user_with_image("describe", "data:image/png;base64,AA==");
        let converted = Groq::convert_message(&msg);

        let Some(GroqContent::Array(parts)) = converted.content else {
            panic!("expected array content");
        };
        assert_eq!(parts.len(), 2);
        assert!(matches!(&parts[1], GroqContentPart::ImageUrl { image_url } if image_url.url.starts_with("data:image/png")));
    }

    #[test]
    fn body_uses_default_model_when_empty() {
        let client = test_client();
        let body = client.build_body(&ChatRequest::default().user("hi"));
        assert_eq!(body.model, GroqConfig::DEFAULT_CHAT_MODEL);

        let body = client.build_body(&ChatRequest::new("other").user("hi"));
        assert_eq!(body.model, "other");
    }

    #[test]
    fn body_carries_sampling_options() {
        let client = test_client();
        let body = client.build_body(&ChatRequest::new("m").user("x").max_tokens(500).temperature(0.3));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["max_tokens"], 500);
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert!(json.get("top_p").is_none());
    }

    mod parse_error {
        use super::*;

        #[test]
        fn unauthorized_is_auth() {
            let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
            let err = Groq::parse_error(401, body);
            assert!(matches!(err, LlmError::Auth { .. }));
            assert_eq!(err.status(), Some(401));
        }

        #[test]
        fn too_many_requests_is_rate_limited() {
            let body = r#"{"error":{"message":"Rate limit reached","type":"tokens"}}"#;
            assert!(matches!(
                Groq::parse_error(429, body),
                LlmError::RateLimited { .. }
            ));
        }

        #[test]
        fn other_structured_errors_keep_status_and_code() {
            let body = r#"{"error":{"message":"model not found","type":"invalid_request_error","code":"model_not_found"}}"#;
            match Groq::parse_error(404, body) {
                LlmError::Provider {
                    status, code, message, ..
                } => {
                    assert_eq!(status, 404);
                    assert_eq!(code.as_deref(), Some("model_not_found"));
                    assert_eq!(message, "model not found");
                }
                other => panic!("expected Provider, got {other:?}"),
            }
        }

        #[test]
        fn code_falls_back_to_type() {
            let body = r#"{"error":{"message":"bad","type":"invalid_request_error"}}"#;
            match Groq::parse_error(400, body) {
                LlmError::Provider { code, .. } => {
                    assert_eq!(code.as_deref(), Some("invalid_request_error"));
                }
                other => panic!("expected Provider, got {other:?}"),
            }
        }

        #[test]
        fn unstructured_body_is_http_status() {
            let err = Groq::parse_error(503, "upstream unavailable");
            assert!(matches!(err, LlmError::HttpStatus { status: 503, .. }));
        }
    }
}
