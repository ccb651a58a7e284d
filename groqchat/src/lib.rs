//! groqchat - a multimodal chatbot pipeline on top of Groq's hosted models.
//!
//! The crate turns a mix of text, image and audio input into a single prompt
//! for a chat-completion model:
//!
//! - images are captioned by a vision model,
//! - audio is transcribed by Whisper,
//! - typed text is passed through as-is.
//!
//! The pieces are usable on their own: [`llms::groq::Groq`] implements
//! [`chat::ChatProvider`] and [`audio::SpeechToTextProvider`], and
//! [`processor::MultimodalProcessor`] stitches them together.

pub mod audio;
pub mod chat;
pub mod error;
pub mod llms;
pub mod media;
pub mod message;
pub mod prelude;
pub mod processor;
pub mod usage;

pub use error::{Error, LlmError, Result};
