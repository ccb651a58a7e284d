//! Groq `ChatProvider` implementation.

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse, FinishReason};
use crate::error::{LlmError, Result};
use crate::message::{Content, Message, Role};

use super::client::{Groq, PROVIDER};
use super::types::GroqChatResponse;

impl Groq {
    /// Parse the wire response into a [`ChatResponse`].
    pub(crate) fn parse_response(response: GroqChatResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::response_format("at least one choice", "empty choices"))?;

        let message = Message {
            role: Role::Assistant,
            content: choice.message.content.map(Content::Text),
        };

        Ok(ChatResponse {
            message,
            finish_reason: FinishReason::from_api(choice.finish_reason.as_deref()),
            usage: response.usage,
            model: response.model,
            id: response.id,
        })
    }
}

#[async_trait]
impl ChatProvider for Groq {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.chat_url();
        let body = self.build_body(request);
        tracing::debug!(
            provider = PROVIDER,
            model = %body.model,
            messages = body.messages.len(),
            "sending chat completion"
        );

        let response = self
            .build_request(&url)
            .json(&body)
            .send()
            .await
            .map_err(LlmError::from)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await.into());
        }

        let response_text = response.text().await.map_err(LlmError::from)?;
        let parsed: GroqChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            LlmError::response_format(
                "valid chat completion response",
                format!("parse error: {e}, response: {response_text}"),
            )
        })?;

        let parsed = Self::parse_response(parsed)?;
        if let Some(usage) = parsed.usage {
            tracing::debug!(provider = PROVIDER, %usage, "chat completion finished");
        }
        Ok(parsed)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn default_model(&self) -> &str {
        self.chat_model()
    }
}
