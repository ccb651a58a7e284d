//! Multimodal request pipeline.
//!
//! A [`MultimodalProcessor`] turns each modality of a [`MultimodalInput`] into
//! text context and sends one combined prompt to the chat model:
//!
//! 1. the image is captioned by the vision model,
//! 2. the audio is transcribed,
//! 3. non-blank typed text is passed through.
//!
//! No API failure fails the request. Captioning and transcription errors become
//! placeholder text inside the prompt, and a failed final call is answered with
//! an `LLM error` line instead of the model's answer.
//!
//! # Example
//!
//! ```rust,ignore
//! use groqchat::prelude::*;
//!
//! let groq = Groq::from_env()?;
//! let options = ProcessorOptions::from_groq_config(groq.config());
//! let processor = MultimodalProcessor::new(groq, options);
//!
//! let input = MultimodalInput::new().with_text("Explain machine learning");
//! println!("{}", processor.chat(&input).await?);
//! ```

use crate::audio::{SpeechToTextProvider, TranscriptionRequest};
use crate::chat::{ChatProvider, ChatRequest};
use crate::error::Result;
use crate::llms::groq::GroqConfig;
use crate::media::{AudioInput, ImageInput};
use crate::message::Message;
use crate::usage::Usage;

/// Reply given when the input carries nothing to work with.
pub const EMPTY_INPUT_REPLY: &str = "Please provide some input (text, image, or audio)!";

/// Instruction appended after the collected context.
pub const PROMPT_SUFFIX: &str = "\n\nPlease provide a helpful response based on the above information:";

/// Default instruction sent to the vision model with every image.
pub const DEFAULT_CAPTION_PROMPT: &str = "Please describe this image in detail. What do you see?";

/// Everything the user handed in for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultimodalInput {
    /// Typed text; ignored when blank.
    pub text: Option<String>,
    /// Uploaded image.
    pub image: Option<ImageInput>,
    /// Uploaded audio clip.
    pub audio: Option<AudioInput>,
}

impl MultimodalInput {
    /// Empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the typed text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach an image.
    #[must_use]
    pub fn with_image(mut self, image: ImageInput) -> Self {
        self.image = Some(image);
        self
    }

    /// Attach an audio clip.
    #[must_use]
    pub fn with_audio(mut self, audio: AudioInput) -> Self {
        self.audio = Some(audio);
        self
    }

    /// The typed text, if it contains anything besides whitespace.
    #[must_use]
    pub fn typed_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.trim().is_empty())
    }

    /// Whether non-blank text was typed.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.typed_text().is_some()
    }

    /// Whether there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_text() && self.image.is_none() && self.audio.is_none()
    }
}

/// Models and sampling settings for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorOptions {
    /// Model answering the combined prompt.
    pub chat_model: String,
    /// Model captioning images.
    pub vision_model: String,
    /// Model transcribing audio.
    pub transcription_model: String,
    /// Instruction sent with each image.
    pub caption_prompt: String,
    /// Token limit for captions.
    pub caption_max_tokens: u32,
    /// Temperature for captions.
    pub caption_temperature: f32,
    /// Token limit for the final answer.
    pub chat_max_tokens: u32,
    /// Temperature for the final answer.
    pub chat_temperature: f32,
}

impl ProcessorOptions {
    /// Default token limit for captions.
    pub const DEFAULT_CAPTION_MAX_TOKENS: u32 = 500;
    /// Default caption temperature.
    pub const DEFAULT_CAPTION_TEMPERATURE: f32 = 0.3;
    /// Default token limit for the final answer.
    pub const DEFAULT_CHAT_MAX_TOKENS: u32 = 1000;
    /// Default temperature for the final answer.
    pub const DEFAULT_CHAT_TEMPERATURE: f32 = 0.7;

    /// Default options using the models configured on a Groq client.
    #[must_use]
    pub fn from_groq_config(config: &GroqConfig) -> Self {
        Self {
            chat_model: config.chat_model.clone(),
            vision_model: config.vision_model.clone(),
            transcription_model: config.transcription_model.clone(),
            ..Self::default()
        }
    }

    /// Set the caption instruction.
    #[must_use]
    pub fn with_caption_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.caption_prompt = prompt.into();
        self
    }

    /// Set caption token limit and temperature.
    #[must_use]
    pub const fn with_caption_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.caption_max_tokens = max_tokens;
        self.caption_temperature = temperature;
        self
    }

    /// Set answer token limit and temperature.
    #[must_use]
    pub const fn with_chat_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.chat_max_tokens = max_tokens;
        self.chat_temperature = temperature;
        self
    }
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            chat_model: GroqConfig::DEFAULT_CHAT_MODEL.to_owned(),
            vision_model: GroqConfig::DEFAULT_VISION_MODEL.to_owned(),
            transcription_model: GroqConfig::DEFAULT_TRANSCRIPTION_MODEL.to_owned(),
            caption_prompt: DEFAULT_CAPTION_PROMPT.to_owned(),
            caption_max_tokens: Self::DEFAULT_CAPTION_MAX_TOKENS,
            caption_temperature: Self::DEFAULT_CAPTION_TEMPERATURE,
            chat_max_tokens: Self::DEFAULT_CHAT_MAX_TOKENS,
            chat_temperature: Self::DEFAULT_CHAT_TEMPERATURE,
        }
    }
}

/// Join collected context into the final prompt.
///
/// Returns `None` when there is nothing to ask about.
#[must_use]
pub fn build_prompt(parts: &[String]) -> Option<String> {
    if parts.is_empty() {
        return None;
    }
    Some(format!("{}{PROMPT_SUFFIX}", parts.join("\n")))
}

/// Orchestrates captioning, transcription and the final chat call.
#[derive(Debug, Clone)]
pub struct MultimodalProcessor<P> {
    provider: P,
    options: ProcessorOptions,
}

impl<P> MultimodalProcessor<P>
where
    P: ChatProvider + SpeechToTextProvider,
{
    /// Create a processor over a provider.
    pub const fn new(provider: P, options: ProcessorOptions) -> Self {
        Self { provider, options }
    }

    /// The underlying provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Pipeline options.
    pub const fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Describe an image with the vision model.
    ///
    /// Never fails: when the API rejects the request the local description is
    /// used instead, and any other failure is reported inline.
    pub async fn caption_image(&self, image: &ImageInput) -> String {
        self.caption(image).await.0
    }

    async fn caption(&self, image: &ImageInput) -> (String, Usage) {
        let request = ChatRequest::new(&self.options.vision_model)
            .message(Message::user_with_image(
                &self.options.caption_prompt,
                image.to_data_url(),
            ))
            .max_tokens(self.options.caption_max_tokens)
            .temperature(self.options.caption_temperature);

        match self.provider.chat(&request).await {
            Ok(response) => (
                response.text().unwrap_or_default(),
                response.usage.unwrap_or_default(),
            ),
            Err(e) if e.is_api_rejection() => {
                tracing::warn!(image = %image.file_name(), error = %e, "vision model unavailable");
                let caption = format!(
                    "Image uploaded: {}. Vision analysis temporarily unavailable.",
                    image.describe_locally()
                );
                (caption, Usage::default())
            }
            Err(e) => {
                tracing::warn!(image = %image.file_name(), error = %e, "image captioning failed");
                (format!("Error processing image: {e}"), Usage::default())
            }
        }
    }

    /// Transcribe an audio clip.
    ///
    /// Never fails: errors are reported inline.
    pub async fn transcribe_audio(&self, audio: &AudioInput) -> String {
        let request = TranscriptionRequest::new(
            &self.options.transcription_model,
            audio.as_bytes().to_vec(),
            audio.file_name(),
        );

        match self.provider.transcribe(&request).await {
            Ok(response) => response.text,
            Err(e) => {
                tracing::warn!(audio = %audio.file_name(), error = %e, "transcription failed");
                match e.status() {
                    Some(status) => format!("Speech-to-text error: {status}"),
                    None => format!("Error processing audio: {e}"),
                }
            }
        }
    }

    /// Ask the chat model a single question.
    ///
    /// Never fails: a rejected request answers `LLM error: <status>`, any other
    /// failure answers `Error with LLM: <error>`.
    pub async fn query_llm(&self, prompt: &str) -> String {
        self.ask(prompt).await.0
    }

    async fn ask(&self, prompt: &str) -> (String, Usage) {
        let request = ChatRequest::new(&self.options.chat_model)
            .user(prompt)
            .max_tokens(self.options.chat_max_tokens)
            .temperature(self.options.chat_temperature);

        match self.provider.chat(&request).await {
            Ok(response) => {
                if response.is_truncated() {
                    tracing::debug!(
                        max_tokens = self.options.chat_max_tokens,
                        "answer hit the token limit"
                    );
                }
                (
                    response.text().unwrap_or_default(),
                    response.usage.unwrap_or_default(),
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat completion failed");
                let answer = match e.status() {
                    Some(status) => format!("LLM error: {status}"),
                    None => format!("Error with LLM: {e}"),
                };
                (answer, Usage::default())
            }
        }
    }

    /// Turn every provided modality into a labelled line of context.
    ///
    /// The order is image, audio, typed text.
    pub async fn collect_parts(&self, input: &MultimodalInput) -> Vec<String> {
        self.collect(input).await.0
    }

    async fn collect(&self, input: &MultimodalInput) -> (Vec<String>, Usage) {
        let mut parts = Vec::with_capacity(3);
        let mut usage = Usage::default();

        if let Some(image) = &input.image {
            let (caption, caption_usage) = self.caption(image).await;
            usage += caption_usage;
            parts.push(format!("Image: {caption}"));
        }
        if let Some(audio) = &input.audio {
            parts.push(format!("Audio: {}", self.transcribe_audio(audio).await));
        }
        if let Some(text) = input.typed_text() {
            parts.push(format!("User typed: {text}"));
        }

        (parts, usage)
    }

    /// Answer a multimodal request.
    ///
    /// Empty input is answered with [`EMPTY_INPUT_REPLY`] without calling the
    /// API. API failures are answered inline, see [`Self::query_llm`].
    pub async fn chat(&self, input: &MultimodalInput) -> Result<String> {
        let (answer, _) = self.chat_with_usage(input).await?;
        Ok(answer)
    }

    /// Like [`Self::chat`], also returning the tokens spent on captioning and
    /// the final answer.
    pub async fn chat_with_usage(&self, input: &MultimodalInput) -> Result<(String, Usage)> {
        let (parts, mut usage) = self.collect(input).await;
        let Some(prompt) = build_prompt(&parts) else {
            return Ok((EMPTY_INPUT_REPLY.to_owned(), usage));
        };

        tracing::debug!(parts = parts.len(), chars = prompt.len(), "sending combined prompt");
        let (answer, answer_usage) = self.ask(&prompt).await;
        usage += answer_usage;
        if !usage.is_empty() {
            tracing::info!(%usage, "request finished");
        }
        Ok((answer, usage))
    }
}
