//! Error types for groqchat.
//!
//! [`Error`] is the crate-wide error. [`LlmError`] covers every failure mode
//! when talking to the hosted model API (authentication, rate limiting,
//! malformed responses, transport problems) and folds into `Error::Llm`.

/// Result type alias for groqchat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for groqchat.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Hosted model API error.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The caller supplied unusable input (unreadable file, unknown format).
    #[error("Invalid input: {0}")]
    Input(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an input error with a message.
    #[must_use]
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Whether the hosted API itself rejected the request.
    ///
    /// This is `true` when a response with a non-success status came back,
    /// and `false` for transport failures, local I/O and parse errors.
    #[must_use]
    pub const fn is_api_rejection(&self) -> bool {
        matches!(self, Self::Llm(err) if err.status().is_some())
    }

    /// HTTP status reported by the hosted API, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Llm(err) => err.status(),
            _ => None,
        }
    }
}

/// Error type for hosted model API operations.
///
/// Each variant represents a distinct failure mode, so callers can match on
/// specific cases (e.g. falling back when the API refuses a request).
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    /// Authentication or authorization failure.
    #[error("[{provider}] {message}")]
    Auth {
        /// Provider name (e.g. "groq").
        provider: String,
        /// Error description.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("[{provider}] Rate limit exceeded. Please retry after some time.")]
    RateLimited {
        /// Provider name.
        provider: String,
    },

    /// Response format error.
    #[error("Expected {expected}, got {got}")]
    ResponseFormat {
        /// Expected format description.
        expected: String,
        /// Actual format received.
        got: String,
    },

    /// Network or connection error.
    #[error("{0}")]
    Network(String),

    /// HTTP status error with an unstructured body.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Structured error returned by the provider.
    #[error("[{provider}] {message}")]
    Provider {
        /// Provider name.
        provider: String,
        /// HTTP status code of the response.
        status: u16,
        /// Error description.
        message: String,
        /// Optional error code from the provider.
        code: Option<String>,
    },

    /// Internal error.
    #[error("{0}")]
    Internal(String),
}

impl LlmError {
    /// Create an authentication error.
    #[must_use]
    pub fn auth(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a rate limit error.
    #[must_use]
    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
        }
    }

    /// Create a response format error.
    #[must_use]
    pub fn response_format(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::ResponseFormat {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a provider error.
    #[must_use]
    pub fn provider(
        provider: impl Into<String>,
        status: u16,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            status,
            message: message.into(),
            code,
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status of the API response that caused this error.
    ///
    /// `None` means the request never got an answer from the API.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { .. } => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::HttpStatus { status, .. } | Self::Provider { status, .. } => Some(*status),
            Self::ResponseFormat { .. } | Self::Network(_) | Self::Internal(_) => None,
        }
    }

    /// Check if this is a retryable error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Network(_))
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("Request timed out")
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {err}"))
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod error {
        use super::*;

        #[test]
        fn input_creates_error() {
            let err = Error::input("image is empty");
            assert!(matches!(err, Error::Input(_)));
            assert!(err.to_string().contains("image is empty"));
        }

        #[test]
        fn from_llm_error() {
            let err: Error = LlmError::network("timeout").into();
            assert!(matches!(err, Error::Llm(_)));
        }

        #[test]
        fn from_io_error() {
            let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
            let err: Error = io_err.into();
            assert!(matches!(err, Error::Io(_)));
        }

        #[test]
        fn from_json_error() {
            let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }

        #[test]
        fn api_rejection_only_for_answered_requests() {
            assert!(Error::from(LlmError::http_status(500, "boom")).is_api_rejection());
            assert!(Error::from(LlmError::auth("groq", "bad key")).is_api_rejection());
            assert!(!Error::from(LlmError::network("refused")).is_api_rejection());
            assert!(!Error::input("nope").is_api_rejection());
        }

        #[test]
        fn status_passes_through() {
            let err: Error = LlmError::provider("groq", 413, None, "too large").into();
            assert_eq!(err.status(), Some(413));
            assert_eq!(Error::input("x").status(), None);
        }
    }

    mod llm_error {
        use super::*;

        #[test]
        fn auth_display_includes_provider() {
            let err = LlmError::auth("groq", "Invalid API Key");
            let s = err.to_string();
            assert!(s.contains("[groq]"));
            assert!(s.contains("Invalid API Key"));
        }

        #[test]
        fn rate_limited_message() {
            let err = LlmError::rate_limited("groq");
            assert!(err.to_string().contains("Rate limit"));
            assert_eq!(err.status(), Some(429));
        }

        #[test]
        fn http_status_display() {
            let err = LlmError::http_status(502, "Bad Gateway");
            assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        }

        #[test]
        fn provider_keeps_code() {
            let err = LlmError::provider(
                "groq",
                404,
                Some("model_not_found".to_owned()),
                "model does not exist",
            );
            match err {
                LlmError::Provider { code, status, .. } => {
                    assert_eq!(code.as_deref(), Some("model_not_found"));
                    assert_eq!(status, 404);
                }
                other => panic!("expected Provider, got {other:?}"),
            }
        }

        #[test]
        fn transport_errors_have_no_status() {
            assert_eq!(LlmError::network("x").status(), None);
            assert_eq!(LlmError::internal("x").status(), None);
            assert_eq!(LlmError::response_format("json", "text").status(), None);
        }

        #[test]
        fn retryable_kinds() {
            assert!(LlmError::rate_limited("groq").is_retryable());
            assert!(LlmError::network("timeout").is_retryable());
            assert!(!LlmError::auth("groq", "bad key").is_retryable());
            assert!(!LlmError::http_status(500, "x").is_retryable());
        }
    }

    #[test]
    fn error_chain_llm_to_error() {
        fn inner() -> std::result::Result<(), LlmError> {
            Err(LlmError::network("test"))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer().unwrap_err(), Error::Llm(_)));
    }
}
