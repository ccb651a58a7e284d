//! Configuration schema definitions.

use groqchat::llms::GroqConfig;
use groqchat::processor::{DEFAULT_CAPTION_PROMPT, ProcessorOptions};
use serde::{Deserialize, Serialize};

use super::{ConfigError, ConfigResult};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Hosted API settings.
    #[serde(default)]
    pub groq: GroqSection,

    /// Web server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Prompting and sampling settings.
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// `[groq]` section.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroqSection {
    /// API key. Usually supplied through `GROQ_API_KEY` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model answering the combined prompt.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Model captioning images.
    #[serde(default = "default_vision_model")]
    pub vision_model: String,
    /// Model transcribing audio.
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    GroqConfig::DEFAULT_BASE_URL.to_owned()
}

fn default_chat_model() -> String {
    GroqConfig::DEFAULT_CHAT_MODEL.to_owned()
}

fn default_vision_model() -> String {
    GroqConfig::DEFAULT_VISION_MODEL.to_owned()
}

fn default_transcription_model() -> String {
    GroqConfig::DEFAULT_TRANSCRIPTION_MODEL.to_owned()
}

const fn default_timeout_secs() -> u64 {
    GroqConfig::DEFAULT_TIMEOUT_SECS
}

impl Default for GroqSection {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            vision_model: default_vision_model(),
            transcription_model: default_transcription_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for GroqSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqSection")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("vision_model", &self.vision_model)
            .field("transcription_model", &self.transcription_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

const fn default_port() -> u16 {
    7860
}

// Whisper rejects files above 25 MB.
const fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[generation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Instruction sent with every image.
    #[serde(default = "default_caption_prompt")]
    pub caption_prompt: String,
    /// Token limit for captions.
    #[serde(default = "default_caption_max_tokens")]
    pub caption_max_tokens: u32,
    /// Temperature for captions.
    #[serde(default = "default_caption_temperature")]
    pub caption_temperature: f32,
    /// Token limit for the final answer.
    #[serde(default = "default_chat_max_tokens")]
    pub chat_max_tokens: u32,
    /// Temperature for the final answer.
    #[serde(default = "default_chat_temperature")]
    pub chat_temperature: f32,
}

fn default_caption_prompt() -> String {
    DEFAULT_CAPTION_PROMPT.to_owned()
}

const fn default_caption_max_tokens() -> u32 {
    ProcessorOptions::DEFAULT_CAPTION_MAX_TOKENS
}

const fn default_caption_temperature() -> f32 {
    ProcessorOptions::DEFAULT_CAPTION_TEMPERATURE
}

const fn default_chat_max_tokens() -> u32 {
    ProcessorOptions::DEFAULT_CHAT_MAX_TOKENS
}

const fn default_chat_temperature() -> f32 {
    ProcessorOptions::DEFAULT_CHAT_TEMPERATURE
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            caption_prompt: default_caption_prompt(),
            caption_max_tokens: default_caption_max_tokens(),
            caption_temperature: default_caption_temperature(),
            chat_max_tokens: default_chat_max_tokens(),
            chat_temperature: default_chat_temperature(),
        }
    }
}

impl AppConfig {
    /// Validate the configuration and return any issues found.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.api_key().is_none() {
            issues.push(ConfigIssue::error(
                "groq.api_key",
                "No API key. Set GROQ_API_KEY in the environment or a .env file.",
            ));
        }

        if self.groq.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                "groq.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        if self.server.port == 0 {
            issues.push(ConfigIssue::error("server.port", "Port must be non-zero"));
        }

        if self.server.max_upload_bytes == 0 {
            issues.push(ConfigIssue::error(
                "server.max_upload_bytes",
                "Upload limit must be at least 1 byte",
            ));
        }

        for (path, temperature) in [
            ("generation.caption_temperature", self.generation.caption_temperature),
            ("generation.chat_temperature", self.generation.chat_temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                issues.push(ConfigIssue::warning(
                    path,
                    format!("Temperature {temperature} is outside 0.0..=2.0"),
                ));
            }
        }

        issues
    }

    /// Check if the configuration is valid (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate()
            .iter()
            .all(|issue| issue.level != IssueLevel::Error)
    }

    /// The API key, if one is set and not blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.groq
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Merge environment variables into the configuration.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Merge variables from `lookup` into the configuration.
    ///
    /// `GROQ_API_KEY` only fills a missing key; `GROQ_BASE_URL` and the model
    /// variables override the file.
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if self.api_key().is_none()
            && let Some(key) = lookup("GROQ_API_KEY")
        {
            self.groq.api_key = Some(key);
        }
        if let Some(url) = lookup("GROQ_BASE_URL") {
            self.groq.base_url = url;
        }
        if let Some(model) = lookup("GROQ_CHAT_MODEL") {
            self.groq.chat_model = model;
        }
        if let Some(model) = lookup("GROQ_VISION_MODEL") {
            self.groq.vision_model = model;
        }
        if let Some(model) = lookup("GROQ_TRANSCRIPTION_MODEL") {
            self.groq.transcription_model = model;
        }

        self
    }

    /// Client configuration for the hosted API.
    pub fn groq_config(&self) -> ConfigResult<GroqConfig> {
        let key = self
            .api_key()
            .ok_or_else(|| ConfigError::MissingField("groq.api_key (or GROQ_API_KEY)".to_owned()))?;

        if self.groq.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "groq.timeout_secs must be at least 1".to_owned(),
            ));
        }

        Ok(GroqConfig::new(key)
            .with_base_url(&self.groq.base_url)
            .with_chat_model(&self.groq.chat_model)
            .with_vision_model(&self.groq.vision_model)
            .with_transcription_model(&self.groq.transcription_model)
            .with_timeout(self.groq.timeout_secs))
    }

    /// Pipeline options built from the `[groq]` and `[generation]` sections.
    #[must_use]
    pub fn processor_options(&self) -> ProcessorOptions {
        ProcessorOptions {
            chat_model: self.groq.chat_model.clone(),
            vision_model: self.groq.vision_model.clone(),
            transcription_model: self.groq.transcription_model.clone(),
            ..ProcessorOptions::default()
        }
        .with_caption_prompt(&self.generation.caption_prompt)
        .with_caption_sampling(
            self.generation.caption_max_tokens,
            self.generation.caption_temperature,
        )
        .with_chat_sampling(
            self.generation.chat_max_tokens,
            self.generation.chat_temperature,
        )
    }
}

/// Configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    /// Issue severity level.
    pub level: IssueLevel,
    /// Configuration path (e.g., "server.port").
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl ConfigIssue {
    /// Create an error-level issue.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a warning-level issue.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            IssueLevel::Error => "ERROR",
            IssueLevel::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", prefix, self.path, self.message)
    }
}

/// Severity level for configuration issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    /// Error that prevents the app from running correctly.
    Error,
    /// Warning about potential issues.
    Warning,
}
