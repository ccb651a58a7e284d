//! What the UI shows after a request: the answer and a status line.

use groqchat::audio::SpeechToTextProvider;
use groqchat::chat::ChatProvider;
use groqchat::processor::{MultimodalInput, MultimodalProcessor};
use serde::{Deserialize, Serialize};

/// Status shown after a successful request.
pub const STATUS_COMPLETED: &str = "Completed";

/// Answer plus status, as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Text for the answer box.
    pub response: String,
    /// Text for the status box.
    pub status: String,
}

impl ChatReply {
    /// A successful answer.
    #[must_use]
    pub fn completed(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: STATUS_COMPLETED.to_owned(),
        }
    }

    /// A failed request, rendered as an apology plus an error status.
    #[must_use]
    pub fn failed(error: &impl std::fmt::Display) -> Self {
        Self {
            response: format!("Sorry, an error occurred: {error}"),
            status: format!("Error: {error}"),
        }
    }
}

/// Summary of which inputs arrived, e.g. `"Processing • Text ✓ • Audio ✓"`.
#[must_use]
pub fn progress_summary(input: &MultimodalInput) -> String {
    let mut status = String::from("Processing");
    if input.text.as_deref().is_some_and(|text| !text.is_empty()) {
        status.push_str(" • Text ✓");
    }
    if input.image.is_some() {
        status.push_str(" • Picture ✓");
    }
    if input.audio.is_some() {
        status.push_str(" • Audio ✓");
    }
    status
}

/// Run one request through the pipeline and turn the outcome into a reply.
pub async fn respond<P>(processor: &MultimodalProcessor<P>, input: &MultimodalInput) -> ChatReply
where
    P: ChatProvider + SpeechToTextProvider,
{
    tracing::info!("{}", progress_summary(input));

    match processor.chat(input).await {
        Ok(answer) => ChatReply::completed(answer),
        Err(e) => {
            tracing::error!(error = %e, "chat request failed");
            ChatReply::failed(&e)
        }
    }
}
