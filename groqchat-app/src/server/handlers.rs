//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        State,
        multipart::{Multipart, MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use groqchat::chat::ChatProvider;
use groqchat::media::{AudioInput, ImageInput};
use groqchat::processor::MultimodalInput;

use super::AppState;
use super::page::INDEX_HTML;
use super::types::{ErrorResponse, StatusResponse, error_codes};
use crate::reply::respond;

type Rejection = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, code: &str, error: impl Into<String>) -> Rejection {
    (status, Json(ErrorResponse::new(code, error)))
}

fn multipart_error(e: &MultipartError) -> Rejection {
    let status = e.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        error_codes::PAYLOAD_TOO_LARGE
    } else {
        error_codes::INVALID_MULTIPART
    };
    reject(status, code, e.body_text())
}

/// GET / - the chat page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/status - configured provider and models.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let options = state.processor.options();
    Json(StatusResponse {
        status: "ready".to_owned(),
        provider: state.processor.provider().provider_name().to_owned(),
        chat_model: options.chat_model.clone(),
        vision_model: options.vision_model.clone(),
        transcription_model: options.transcription_model.clone(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// POST /api/chat - run one multimodal request.
///
/// Accepts `multipart/form-data` with optional `text`, `image` and `audio`
/// fields. Empty file fields count as "not provided".
pub async fn chat(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            return reject(
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_MULTIPART,
                rejection.body_text(),
            )
            .into_response();
        }
    };

    let input = match read_input(multipart).await {
        Ok(input) => input,
        Err(rejection) => return rejection.into_response(),
    };

    let reply = respond(&state.processor, &input).await;
    (StatusCode::OK, Json(reply)).into_response()
}

/// Collect the form fields into a [`MultimodalInput`].
async fn read_input(mut multipart: Multipart) -> Result<MultimodalInput, Rejection> {
    let mut input = MultimodalInput::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        let file_name = field.file_name().map(ToOwned::to_owned);

        match name.as_str() {
            "text" => {
                let text = field.text().await.map_err(|e| multipart_error(&e))?;
                input.text = Some(text);
            }
            "image" => {
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                if bytes.is_empty() {
                    continue;
                }
                let file_name = file_name.unwrap_or_else(|| "image".to_owned());
                let image = ImageInput::new(bytes.to_vec(), file_name).map_err(|e| {
                    reject(StatusCode::BAD_REQUEST, error_codes::INVALID_IMAGE, e.to_string())
                })?;
                input.image = Some(image);
            }
            "audio" => {
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                if bytes.is_empty() {
                    continue;
                }
                let file_name = file_name.unwrap_or_else(|| "audio.wav".to_owned());
                let audio = AudioInput::new(bytes.to_vec(), file_name).map_err(|e| {
                    reject(StatusCode::BAD_REQUEST, error_codes::INVALID_AUDIO, e.to_string())
                })?;
                input.audio = Some(audio);
            }
            other => {
                tracing::debug!(field = other, "ignoring unknown form field");
            }
        }
    }

    Ok(input)
}
