//! Groq client configuration.

use crate::error::{LlmError, Result};

/// Configuration for the Groq client.
#[derive(Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Model for text chat completions.
    pub chat_model: String,
    /// Model for image captioning.
    pub vision_model: String,
    /// Model for speech-to-text.
    pub transcription_model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl GroqConfig {
    /// Default Groq API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1";
    /// Default chat model.
    pub const DEFAULT_CHAT_MODEL: &'static str = "llama-3.3-70b-versatile";
    /// Default vision model.
    pub const DEFAULT_VISION_MODEL: &'static str = "meta-llama/llama-4-scout-17b-16e-instruct";
    /// Default transcription model.
    pub const DEFAULT_TRANSCRIPTION_MODEL: &'static str = "whisper-large-v3";
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Creates a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads from:
    /// - `GROQ_API_KEY` - Required API key
    /// - `GROQ_BASE_URL` - Optional base URL
    /// - `GROQ_CHAT_MODEL` - Optional chat model
    /// - `GROQ_VISION_MODEL` - Optional vision model
    /// - `GROQ_TRANSCRIPTION_MODEL` - Optional transcription model
    ///
    /// Blank values count as unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var("GROQ_API_KEY")
            .ok_or_else(|| LlmError::auth("groq", "GROQ_API_KEY environment variable not set"))?;

        let mut config = Self::new(api_key);
        if let Some(url) = var("GROQ_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(model) = var("GROQ_CHAT_MODEL") {
            config.chat_model = model;
        }
        if let Some(model) = var("GROQ_VISION_MODEL") {
            config.vision_model = model;
        }
        if let Some(model) = var("GROQ_TRANSCRIPTION_MODEL") {
            config.transcription_model = model;
        }
        Ok(config)
    }

    /// Sets the base URL. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_owned();
        self
    }

    /// Sets the chat model.
    #[must_use]
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Sets the vision model.
    #[must_use]
    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = model.into();
        self
    }

    /// Sets the transcription model.
    #[must_use]
    pub fn with_transcription_model(mut self, model: impl Into<String>) -> Self {
        self.transcription_model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            chat_model: Self::DEFAULT_CHAT_MODEL.to_owned(),
            vision_model: Self::DEFAULT_VISION_MODEL.to_owned(),
            transcription_model: Self::DEFAULT_TRANSCRIPTION_MODEL.to_owned(),
            timeout_secs: Some(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

// The key never shows up in logs.
impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("vision_model", &self.vision_model)
            .field("transcription_model", &self.transcription_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn test_config_new() {
        let config = GroqConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, GroqConfig::DEFAULT_BASE_URL);
        assert_eq!(config.chat_model, "llama-3.3-70b-versatile");
        assert_eq!(config.vision_model, "meta-llama/llama-4-scout-17b-16e-instruct");
        assert_eq!(config.transcription_model, "whisper-large-v3");
        assert_eq!(config.timeout_secs, Some(120));
    }

    #[test]
    fn test_config_builder() {
        let config = GroqConfig::new("key")
            .with_base_url("http://localhost:8080/v1/")
            .with_chat_model("llama-3.1-8b-instant")
            .with_vision_model("vision")
            .with_transcription_model("whisper-large-v3-turbo")
            .with_timeout(30);

        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.chat_model, "llama-3.1-8b-instant");
        assert_eq!(config.vision_model, "vision");
        assert_eq!(config.transcription_model, "whisper-large-v3-turbo");
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", GroqConfig::new("gsk_secret"));
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_lookup_trims_base_url_slash() {
        let config = GroqConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "gsk_env"),
            ("GROQ_BASE_URL", "http://localhost:8080/v1/"),
            ("GROQ_CHAT_MODEL", "llama-3.1-8b-instant"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "gsk_env");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.chat_model, "llama-3.1-8b-instant");
        assert_eq!(config.vision_model, GroqConfig::DEFAULT_VISION_MODEL);
    }

    #[test]
    fn test_lookup_ignores_blank_values() {
        let config = GroqConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "gsk_env"),
            ("GROQ_BASE_URL", ""),
            ("GROQ_TRANSCRIPTION_MODEL", "  "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, GroqConfig::DEFAULT_BASE_URL);
        assert_eq!(config.transcription_model, GroqConfig::DEFAULT_TRANSCRIPTION_MODEL);
    }

    #[test]
    fn test_lookup_requires_key() {
        assert!(GroqConfig::from_lookup(lookup(&[])).is_err());
        assert!(GroqConfig::from_lookup(lookup(&[("GROQ_API_KEY", " ")])).is_err());
    }
}
