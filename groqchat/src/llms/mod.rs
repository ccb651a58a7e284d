//! Hosted model backends.
//!
//! # Available Backends
//!
//! - [`groq`] - Groq's OpenAI-compatible API (chat, vision, Whisper)

pub mod groq;

pub use groq::{Groq, GroqConfig};
