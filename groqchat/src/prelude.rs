//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use groqchat::prelude::*;
//! ```

pub use crate::audio::{
    AudioFormat, SpeechToTextProvider, TranscriptionRequest, TranscriptionResponse,
    TranscriptionResponseFormat,
};
pub use crate::chat::{ChatProvider, ChatRequest, ChatResponse, FinishReason};
pub use crate::error::{Error, LlmError, Result};
pub use crate::llms::{Groq, GroqConfig};
pub use crate::media::{AudioInput, ImageFormat, ImageInput};
pub use crate::message::{Content, ContentPart, ImageDetail, ImageUrl, Message, Role};
pub use crate::processor::{
    EMPTY_INPUT_REPLY, MultimodalInput, MultimodalProcessor, ProcessorOptions, build_prompt,
};
pub use crate::usage::Usage;
