//! Speech-to-text types and the provider trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use groqchat::prelude::*;
//!
//! let audio = std::fs::read("question.mp3")?;
//! let request = TranscriptionRequest::new("whisper-large-v3", audio, "question.mp3");
//! let response = provider.transcribe(&request).await?;
//! println!("Transcribed: {}", response.text);
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Audio container formats accepted by the transcription endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WAV format
    Wav,
    /// MP3 format
    Mp3,
    /// FLAC format
    Flac,
    /// OGG format
    Ogg,
    /// WebM format
    WebM,
    /// M4A format
    M4a,
    /// MP4 audio
    Mp4,
    /// MPEG audio
    Mpeg,
    /// MPGA audio
    Mpga,
    /// Opus format
    Opus,
    /// AAC format
    Aac,
}

impl AudioFormat {
    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::WebM => "webm",
            Self::M4a => "m4a",
            Self::Mp4 => "mp4",
            Self::Mpeg => "mpeg",
            Self::Mpga => "mpga",
            Self::Opus => "opus",
            Self::Aac => "aac",
        }
    }

    /// Get the MIME type sent with the upload.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 | Self::Mpeg => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::Ogg => "audio/ogg",
            Self::WebM => "audio/webm",
            Self::M4a => "audio/m4a",
            Self::Mp4 => "audio/mp4",
            Self::Mpga => "audio/mpga",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
        }
    }

    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "webm" => Some(Self::WebM),
            "m4a" => Some(Self::M4a),
            "mp4" => Some(Self::Mp4),
            "mpeg" => Some(Self::Mpeg),
            "mpga" => Some(Self::Mpga),
            "opus" => Some(Self::Opus),
            "aac" => Some(Self::Aac),
            _ => None,
        }
    }
}

/// Output format for transcription responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptionResponseFormat {
    /// JSON with text only.
    #[default]
    Json,
    /// Plain text.
    Text,
    /// Verbose JSON with language and duration.
    VerboseJson,
}

impl TranscriptionResponseFormat {
    /// Get the format string for API requests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::VerboseJson => "verbose_json",
        }
    }
}

/// Request for transcribing audio to text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionRequest {
    /// Model to use (e.g. "whisper-large-v3").
    pub model: String,
    /// Audio bytes.
    #[serde(skip)]
    pub audio: Vec<u8>,
    /// File name sent with the upload; the API uses its extension.
    pub file_name: String,
    /// MIME type sent with the upload.
    pub mime_type: String,
    /// Optional language hint (ISO 639-1 code, e.g. "en").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Optional prompt to guide the transcription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Output format.
    pub response_format: TranscriptionResponseFormat,
    /// Sampling temperature (0.0 to 1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl TranscriptionRequest {
    /// Create a new transcription request.
    ///
    /// The MIME type is derived from the file name's extension; see
    /// [`crate::media::audio_mime_type`].
    #[must_use]
    pub fn new(model: impl Into<String>, audio: Vec<u8>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let mime_type = crate::media::audio_mime_type(&file_name);
        Self {
            model: model.into(),
            audio,
            file_name,
            mime_type,
            language: None,
            prompt: None,
            response_format: TranscriptionResponseFormat::default(),
            temperature: None,
        }
    }

    /// Override the MIME type.
    #[must_use]
    pub fn mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = mime.into();
        self
    }

    /// Set the language hint (ISO 639-1 code).
    #[must_use]
    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    /// Set the prompt to guide transcription.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the response format.
    #[must_use]
    pub const fn response_format(mut self, format: TranscriptionResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Set the temperature (0.0 to 1.0).
    #[must_use]
    pub const fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from a transcription request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// The transcribed text.
    pub text: String,
    /// Detected language (verbose format only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Audio duration in seconds (verbose format only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
}

impl TranscriptionResponse {
    /// Create a response with just text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            duration: None,
        }
    }
}

/// A backend that turns speech into text.
#[async_trait]
pub trait SpeechToTextProvider: Send + Sync {
    /// Transcribe audio to text.
    async fn transcribe(&self, request: &TranscriptionRequest) -> Result<TranscriptionResponse>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod audio_format {
        use super::*;

        #[test]
        fn mp3_uploads_as_mpeg() {
            assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        }

        #[test]
        fn wav_and_ogg_mime() {
            assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
            assert_eq!(AudioFormat::Ogg.mime_type(), "audio/ogg");
        }

        #[test]
        fn from_extension_is_case_insensitive() {
            assert_eq!(AudioFormat::from_extension("MP3"), Some(AudioFormat::Mp3));
            assert_eq!(AudioFormat::from_extension("WebM"), Some(AudioFormat::WebM));
            assert_eq!(AudioFormat::from_extension("xyz"), None);
        }

        #[test]
        fn extension_matches_from_extension() {
            for format in [
                AudioFormat::Wav,
                AudioFormat::Mp3,
                AudioFormat::Flac,
                AudioFormat::M4a,
                AudioFormat::Mpga,
            ] {
                assert_eq!(AudioFormat::from_extension(format.extension()), Some(format));
            }
        }
    }

    mod transcription_request {
        use super::*;

        #[test]
        fn new_derives_mime_from_name() {
            let req = TranscriptionRequest::new("whisper-large-v3", vec![1, 2, 3], "clip.mp3");
            assert_eq!(req.mime_type, "audio/mpeg");
            assert_eq!(req.file_name, "clip.mp3");
            assert_eq!(req.response_format, TranscriptionResponseFormat::Json);
        }

        #[test]
        fn builder_sets_options() {
            let req = TranscriptionRequest::new("whisper-large-v3", Vec::new(), "a.wav")
                .language("en")
                .prompt("Technical vocabulary")
                .temperature(0.0)
                .response_format(TranscriptionResponseFormat::VerboseJson)
                .mime_type("audio/x-wav");

            assert_eq!(req.language.as_deref(), Some("en"));
            assert_eq!(req.prompt.as_deref(), Some("Technical vocabulary"));
            assert_eq!(req.temperature, Some(0.0));
            assert_eq!(req.response_format.as_str(), "verbose_json");
            assert_eq!(req.mime_type, "audio/x-wav");
        }
    }

    #[test]
    fn transcription_response_deserializes_verbose() {
        let json = r#"{"task":"transcribe","language":"english","duration":8.47,"text":"Hello"}"#;
        let resp: TranscriptionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text, "Hello");
        assert_eq!(resp.language.as_deref(), Some("english"));
        assert!(resp.duration.is_some());
    }
}
