//! Groq API client.
//!
//! Groq exposes an OpenAI-compatible surface. This module supports:
//! - Chat completions (text and vision)
//! - Speech-to-Text (Whisper)

mod audio;
mod chat;
mod client;
mod config;
mod types;

pub use client::Groq;
pub use config::GroqConfig;
