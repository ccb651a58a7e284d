//! Error types for the groqchat application.

use crate::config::ConfigError;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded, saved, or is incomplete.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The chat pipeline failed.
    #[error(transparent)]
    Chat(#[from] groqchat::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The web server failed to start or crashed.
    #[error("server error: {0}")]
    Server(String),
}

impl AppError {
    /// Create a server error.
    #[must_use]
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }
}
