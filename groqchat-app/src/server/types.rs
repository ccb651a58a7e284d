//! HTTP API request/response types.

use serde::{Deserialize, Serialize};

/// `GET /api/status` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"ready"` once the server answers.
    pub status: String,
    /// Hosted API provider.
    pub provider: String,
    /// Model answering the combined prompt.
    pub chat_model: String,
    /// Model captioning images.
    pub vision_model: String,
    /// Model transcribing audio.
    pub transcription_model: String,
    /// Application version.
    pub version: String,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Machine-readable error code, see [`error_codes`].
    pub code: String,
}

impl ErrorResponse {
    /// Create an error body.
    #[must_use]
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_owned(),
        }
    }
}

/// Error code constants.
pub mod error_codes {
    /// The body is not valid `multipart/form-data`.
    pub const INVALID_MULTIPART: &str = "INVALID_MULTIPART";
    /// The uploaded image is not a supported format.
    pub const INVALID_IMAGE: &str = "INVALID_IMAGE";
    /// The uploaded audio could not be used.
    pub const INVALID_AUDIO: &str = "INVALID_AUDIO";
    /// The upload exceeds the configured size limit.
    pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
}
