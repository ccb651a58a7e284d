//! End-to-end tests of the Groq client and the multimodal pipeline against a
//! mocked API server.

#![allow(clippy::unwrap_used, clippy::panic)]

use groqchat::prelude::*;
use httpmock::prelude::*;
use serde_json::json;

const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x64, 0x60, 0xF8, 0x5F,
    0x0F, 0x00, 0x02, 0x87, 0x01, 0x80, 0xEB, 0x47, 0xBA, 0x92, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
    0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn client(server: &MockServer) -> Groq {
    Groq::new(GroqConfig::new("test-key").with_base_url(server.url("/openai/v1"))).unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
    })
}

mod chat {
    use super::*;

    #[tokio::test]
    async fn sends_bearer_auth_and_parses_answer() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/v1/chat/completions")
                    .header("authorization", "Bearer test-key")
                    .body_contains("\"model\":\"llama-3.3-70b-versatile\"")
                    .body_contains("\"max_tokens\":1000");
                then.status(200).json_body(completion("Hello from Groq"));
            })
            .await;

        let request = ChatRequest::default().user("Hello!").max_tokens(1000);
        let response = client(&server).chat(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text().as_deref(), Some("Hello from Groq"));
        assert_eq!(response.usage.unwrap().total_tokens, 15);
        assert_eq!(response.finish_reason, FinishReason::Stop);
    }

    #[tokio::test]
    async fn invalid_key_is_auth_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/openai/v1/chat/completions");
                then.status(401).json_body(json!({
                    "error": {
                        "message": "Invalid API Key",
                        "type": "invalid_request_error",
                        "code": "invalid_api_key"
                    }
                }));
            })
            .await;

        let err = client(&server)
            .chat(&ChatRequest::default().user("hi"))
            .await
            .unwrap_err();

        assert!(err.is_api_rejection());
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("Invalid API Key"));
    }

    #[tokio::test]
    async fn garbage_body_is_response_format_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/openai/v1/chat/completions");
                then.status(200).body("not json");
            })
            .await;

        let err = client(&server)
            .chat(&ChatRequest::default().user("hi"))
            .await
            .unwrap_err();

        assert!(!err.is_api_rejection());
        assert!(matches!(err, Error::Llm(LlmError::ResponseFormat { .. })));
    }

    #[tokio::test]
    async fn unreachable_server_is_not_a_rejection() {
        let groq = Groq::new(GroqConfig::new("k").with_base_url("http://127.0.0.1:1/v1")).unwrap();
        let err = groq.chat(&ChatRequest::default().user("hi")).await.unwrap_err();
        assert!(!err.is_api_rejection());
        assert_eq!(err.status(), None);
    }
}

mod transcription {
    use super::*;

    #[tokio::test]
    async fn uploads_multipart_form() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/v1/audio/transcriptions")
                    .header("authorization", "Bearer test-key")
                    .body_contains("name=\"model\"")
                    .body_contains("whisper-large-v3")
                    .body_contains("filename=\"voice.mp3\"")
                    .body_contains("audio/mpeg");
                then.status(200).json_body(json!({"text": "testing one two"}));
            })
            .await;

        let request = TranscriptionRequest::new("whisper-large-v3", b"ID3data".to_vec(), "voice.mp3");
        let response = client(&server).transcribe(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text, "testing one two");
    }

    #[tokio::test]
    async fn server_error_keeps_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/openai/v1/audio/transcriptions");
                then.status(500).body("internal");
            })
            .await;

        let request = TranscriptionRequest::new("", b"RIFF".to_vec(), "clip.wav");
        let err = client(&server).transcribe(&request).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}

mod pipeline {
    use super::*;

    fn processor(server: &MockServer) -> MultimodalProcessor<Groq> {
        let groq = client(server);
        let options = ProcessorOptions::from_groq_config(groq.config());
        MultimodalProcessor::new(groq, options)
    }

    #[tokio::test]
    async fn combines_caption_transcript_and_text() {
        let server = MockServer::start_async().await;
        let vision = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/v1/chat/completions")
                    .body_contains("meta-llama/llama-4-scout-17b-16e-instruct")
                    .body_contains("data:image/png;base64,");
                then.status(200).json_body(completion("A single transparent pixel."));
            })
            .await;
        let whisper = server
            .mock_async(|when, then| {
                when.method(POST).path("/openai/v1/audio/transcriptions");
                then.status(200).json_body(json!({"text": "What colour is it?"}));
            })
            .await;
        let answer = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/v1/chat/completions")
                    .body_contains("Image: A single transparent pixel.")
                    .body_contains("Audio: What colour is it?")
                    .body_contains("User typed: Keep it short");
                then.status(200).json_body(completion("It is transparent."));
            })
            .await;

        let input = MultimodalInput::new()
            .with_text("Keep it short")
            .with_image(ImageInput::new(PNG_1X1.to_vec(), "pixel.png").unwrap())
            .with_audio(AudioInput::new(b"RIFF0000WAVE".to_vec(), "question.wav").unwrap());

        let reply = processor(&server).chat(&input).await.unwrap();

        assert_eq!(reply, "It is transparent.");
        vision.assert_async().await;
        whisper.assert_async().await;
        answer.assert_async().await;
    }

    #[tokio::test]
    async fn vision_outage_uses_local_description() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/v1/chat/completions")
                    .body_contains("image_url");
                then.status(503).body("over capacity");
            })
            .await;
        let answer = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/v1/chat/completions")
                    .body_contains(
                        "Image: Image uploaded: pixel.png (Size: 1x1, Mode: RGBA). Vision analysis temporarily unavailable.",
                    );
                then.status(200).json_body(completion("I can only see the file details."));
            })
            .await;

        let input = MultimodalInput::new()
            .with_image(ImageInput::new(PNG_1X1.to_vec(), "pixel.png").unwrap());
        let reply = processor(&server).chat(&input).await.unwrap();

        assert_eq!(reply, "I can only see the file details.");
        answer.assert_async().await;
    }

    #[tokio::test]
    async fn empty_input_never_calls_the_api() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(500);
            })
            .await;

        let reply = processor(&server)
            .chat(&MultimodalInput::new().with_text(""))
            .await
            .unwrap();

        assert_eq!(reply, EMPTY_INPUT_REPLY);
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn failed_answer_is_reported_as_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/openai/v1/chat/completions");
                then.status(500).body("upstream down");
            })
            .await;

        let reply = processor(&server)
            .chat(&MultimodalInput::new().with_text("hi"))
            .await
            .unwrap();

        assert_eq!(reply, "LLM error: 500");
    }
}
