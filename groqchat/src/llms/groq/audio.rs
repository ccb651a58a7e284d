//! Groq Speech-to-Text (Whisper) implementation.

use async_trait::async_trait;

use crate::audio::{
    SpeechToTextProvider, TranscriptionRequest, TranscriptionResponse,
    TranscriptionResponseFormat,
};
use crate::error::{LlmError, Result};

use super::client::{Groq, PROVIDER};
use super::types::GroqTranscriptionResponse;

/// Text reported when the API answers without a transcript.
pub(crate) const NO_TEXT_TRANSCRIBED: &str = "No text transcribed";

impl Groq {
    /// Build the multipart form for a transcription upload.
    pub(crate) fn transcription_form(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<reqwest::multipart::Form> {
        let model = if request.model.is_empty() {
            self.transcription_model().to_owned()
        } else {
            request.model.clone()
        };

        let file_part = reqwest::multipart::Part::bytes(request.audio.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|e| LlmError::internal(format!("Invalid MIME type: {e}")))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", model)
            .text("response_format", request.response_format.as_str());

        if let Some(ref lang) = request.language {
            form = form.text("language", lang.clone());
        }
        if let Some(ref prompt) = request.prompt {
            form = form.text("prompt", prompt.clone());
        }
        if let Some(temp) = request.temperature {
            form = form.text("temperature", temp.to_string());
        }

        Ok(form)
    }

    /// Parse a transcription body according to the requested format.
    pub(crate) fn parse_transcription(
        format: TranscriptionResponseFormat,
        body: &str,
    ) -> Result<TranscriptionResponse> {
        if format == TranscriptionResponseFormat::Text {
            return Ok(TranscriptionResponse::new(body.trim()));
        }

        let parsed: GroqTranscriptionResponse = serde_json::from_str(body).map_err(|e| {
            LlmError::response_format(
                "valid transcription response",
                format!("parse error: {e}, response: {body}"),
            )
        })?;

        Ok(TranscriptionResponse {
            text: parsed
                .text
                .unwrap_or_else(|| NO_TEXT_TRANSCRIBED.to_owned()),
            language: parsed.language,
            duration: parsed.duration,
        })
    }
}

#[async_trait]
impl SpeechToTextProvider for Groq {
    async fn transcribe(&self, request: &TranscriptionRequest) -> Result<TranscriptionResponse> {
        let url = self.transcriptions_url();
        let form = self.transcription_form(request)?;
        tracing::debug!(
            provider = PROVIDER,
            file = %request.file_name,
            mime = %request.mime_type,
            bytes = request.audio.len(),
            "sending transcription"
        );

        let response = self
            .build_multipart_request(&url)
            .multipart(form)
            .send()
            .await
            .map_err(LlmError::from)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await.into());
        }

        let body = response.text().await.map_err(LlmError::from)?;
        Self::parse_transcription(request.response_format, &body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::llms::groq::GroqConfig;

    #[test]
    fn json_response_text() {
        let resp =
            Groq::parse_transcription(TranscriptionResponseFormat::Json, r#"{"text":" Hello."}"#)
                .unwrap();
        assert_eq!(resp.text, " Hello.");
    }

    #[test]
    fn missing_text_uses_placeholder() {
        let resp = Groq::parse_transcription(
            TranscriptionResponseFormat::Json,
            r#"{"x_groq":{"id":"req_1"}}"#,
        )
        .unwrap();
        assert_eq!(resp.text, NO_TEXT_TRANSCRIBED);
    }

    #[test]
    fn verbose_response_fields() {
        let resp = Groq::parse_transcription(
            TranscriptionResponseFormat::VerboseJson,
            r#"{"task":"transcribe","language":"English","duration":2.5,"text":"hi","segments":[]}"#,
        )
        .unwrap();
        assert_eq!(resp.language.as_deref(), Some("English"));
        assert!((resp.duration.unwrap() - 2.5).abs() < 0.001);
    }

    #[test]
    fn text_format_is_raw_body() {
        let resp =
            Groq::parse_transcription(TranscriptionResponseFormat::Text, "plain words\n").unwrap();
        assert_eq!(resp.text, "plain words");
    }

    #[test]
    fn invalid_json_is_response_format_error() {
        let err = Groq::parse_transcription(TranscriptionResponseFormat::Json, "<html>").unwrap_err();
        assert!(err.to_string().contains("valid transcription response"));
    }

    #[test]
    fn form_rejects_bad_mime() {
        let client = Groq::new(GroqConfig::new("k")).unwrap();
        let request =
            TranscriptionRequest::new("", vec![1, 2], "clip.wav").mime_type("not a mime");
        assert!(client.transcription_form(&request).is_err());
    }
}
