//! groqchat application: configuration, web UI and the glue between them and
//! the [`groqchat`] pipeline.
//!
//! The `groqchat` binary wraps this crate with a command line; see
//! `groqchat --help`.

pub mod config;
pub mod error;
pub mod reply;
pub mod server;

pub use error::{AppError, Result};
pub use reply::{ChatReply, respond};
