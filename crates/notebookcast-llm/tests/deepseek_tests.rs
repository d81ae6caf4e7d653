#![allow(unused_imports)]
use notebookcast_llm::{
    builder::LLMBuilder,
    chat::{ChatMessage, ChatProvider, StructuredOutputFormat},
    error::LLMError,
};
use std::sync::Arc;

#[cfg(feature = "deepseek")]
mod deepseek_tests {
    use super::*;
    use httpmock::prelude::*;
    use notebookcast_llm::backends::deepseek::DeepSeek;
    use serde_json::json;

    fn mocked_deepseek(server: &MockServer, api_key: &str) -> Arc<DeepSeek> {
        LLMBuilder::<DeepSeek>::new()
            .api_key(api_key)
            .base_url(server.url("/v1"))
            .model("deepseek-chat")
            .max_tokens(4096)
            .temperature(0.1)
            .timeout_seconds(5)
            .build()
            .expect("Failed to build DeepSeek client")
    }

    fn dialogue_format() -> StructuredOutputFormat {
        StructuredOutputFormat {
            name: "dialogue".to_string(),
            description: None,
            schema: Some(json!({"type": "object"})),
            strict: None,
        }
    }

    #[test]
    fn test_deepseek_builder_validation() {
        let result = LLMBuilder::<DeepSeek>::new().model("deepseek-chat").build();
        match result {
            Err(LLMError::InvalidRequest(msg)) => {
                assert!(msg.contains("No API key provided"));
            }
            _ => panic!("Expected InvalidRequest error"),
        }
    }

    #[tokio::test]
    async fn test_deepseek_chat_sends_json_mode_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .header("authorization", "Bearer test-key")
                    .body_includes("\"response_format\":{\"type\":\"json_object\"}")
                    .body_includes("\"model\":\"deepseek-chat\"")
                    .body_includes("\"max_tokens\":4096");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "choices": [{
                            "message": {"role": "assistant", "content": "{\"dialogue\": []}"}
                        }],
                        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
                    }));
            })
            .await;

        let client = mocked_deepseek(&server, "test-key");
        let reply = client
            .chat(
                &[ChatMessage::system("sys"), ChatMessage::user("text")],
                Some(dialogue_format()),
            )
            .await
            .expect("chat should succeed");

        mock.assert_async().await;
        assert_eq!(reply.text().as_deref(), Some("{\"dialogue\": []}"));
        assert_eq!(reply.usage().map(|u| u.total_tokens), Some(15));
    }

    #[tokio::test]
    async fn test_deepseek_unauthorized_maps_to_auth_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(401).body("invalid key");
            })
            .await;

        let client = mocked_deepseek(&server, "bad-key");
        let err = client
            .chat(&[ChatMessage::user("hi")], None)
            .await
            .unwrap_err();
        assert!(matches!(err, LLMError::AuthError(ref msg) if msg.contains("invalid key")));
    }

    #[tokio::test]
    async fn test_deepseek_server_error_maps_to_provider_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(503).body("overloaded");
            })
            .await;

        let client = mocked_deepseek(&server, "test-key");
        let err = client
            .chat(&[ChatMessage::user("hi")], None)
            .await
            .unwrap_err();
        match err {
            LLMError::ProviderError(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("overloaded"));
            }
            other => panic!("Expected ProviderError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deepseek_malformed_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).body("not json");
            })
            .await;

        let client = mocked_deepseek(&server, "test-key");
        let err = client
            .chat(&[ChatMessage::user("hi")], None)
            .await
            .unwrap_err();
        match err {
            LLMError::ResponseFormatError { raw_response, .. } => {
                assert_eq!(raw_response, "not json");
            }
            other => panic!("Expected ResponseFormatError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deepseek_empty_choices_yield_no_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let client = mocked_deepseek(&server, "test-key");
        let reply = client.chat(&[ChatMessage::user("hi")], None).await.unwrap();
        assert!(reply.text().is_none());
    }
}
