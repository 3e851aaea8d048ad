//! Provider tests
//!
//! Exercise the Anthropic and OpenAI providers against mock HTTP servers

use httpmock::prelude::*;
use resume_tailor::config::ProviderEndpoint;
use resume_tailor::models::ProviderKind;
use resume_tailor::providers::{
    AnthropicProvider, CompletionRequest, OpenAIProvider, Provider, ProviderFailure, NO_RESPONSE_MESSAGE,
    REQUEST_BUILD_MESSAGE,
};
use serde_json::json;
use std::time::Duration;
use tracing::Span;

fn anthropic_endpoint(base_url: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: base_url.to_string(),
        model: "claude-3-haiku-20240307".to_string(),
        api_version: Some("2023-06-01".to_string()),
        probe_max_tokens: 10,
    }
}

fn openai_endpoint(base_url: &str) -> ProviderEndpoint {
    ProviderEndpoint {
        base_url: base_url.to_string(),
        model: "gpt-3.5-turbo".to_string(),
        api_version: None,
        probe_max_tokens: 5,
    }
}

fn completion(message: &str, max_tokens: u32) -> CompletionRequest {
    CompletionRequest {
        user_message: message.to_string(),
        max_tokens,
        timeout: Duration::from_secs(5),
        span: Span::none(),
    }
}

#[tokio::test]
async fn test_anthropic_success_sends_headers_and_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "sk-ant-test-1234")
                .header("anthropic-version", "2023-06-01")
                .body_contains("\"model\":\"claude-3-haiku-20240307\"")
                .body_contains("\"max_tokens\":4000")
                .body_contains("Write my resume");
            then.status(200).json_body(json!({
                "id": "msg_1",
                "type": "message",
                "content": [
                    {"type": "text", "text": "## TAILORED RESUME\nA\n"},
                    {"type": "text", "text": "## INTERVIEW PREPARATION\nB"}
                ]
            }));
        })
        .await;

    let provider = AnthropicProvider::new(&anthropic_endpoint(&server.base_url())).unwrap();
    let response = provider
        .complete("sk-ant-test-1234", &completion("Write my resume", 4000))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.provider, ProviderKind::Anthropic);
    assert_eq!(response.text(), "## TAILORED RESUME\nA\n## INTERVIEW PREPARATION\nB");
}

#[tokio::test]
async fn test_anthropic_auth_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(401).json_body(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            }));
        })
        .await;

    let provider = AnthropicProvider::new(&anthropic_endpoint(&server.base_url())).unwrap();
    let failure = provider
        .complete("sk-ant-wrong", &completion("Hello", 10))
        .await
        .unwrap_err();

    assert_eq!(failure, ProviderFailure::Auth("invalid x-api-key".to_string()));
}

#[tokio::test]
async fn test_anthropic_rate_limit_and_invalid_request() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages").body_contains("slow");
            then.status(429).json_body(json!({
                "type": "error",
                "error": {"type": "rate_limit_error", "message": "Number of requests has exceeded your rate limit"}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages").body_contains("broken");
            then.status(400).json_body(json!({
                "type": "error",
                "error": {"type": "invalid_request_error", "message": "max_tokens: field required"}
            }));
        })
        .await;

    let provider = AnthropicProvider::new(&anthropic_endpoint(&server.base_url())).unwrap();

    let failure = provider.complete("sk-ant-x", &completion("slow", 10)).await.unwrap_err();
    assert_eq!(failure.tag(), "rate_limit_error");

    let failure = provider.complete("sk-ant-x", &completion("broken", 10)).await.unwrap_err();
    assert_eq!(failure.tag(), "invalid_request_error");
    assert_eq!(failure.message(), "max_tokens: field required");
}

#[tokio::test]
async fn test_unstructured_error_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let provider = AnthropicProvider::new(&anthropic_endpoint(&server.base_url())).unwrap();
    let failure = provider.complete("sk-ant-x", &completion("Hello", 10)).await.unwrap_err();

    assert_eq!(failure.tag(), "unknown_error");
    assert!(failure.message().contains("HTTP 502"));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1
    let provider = AnthropicProvider::new(&anthropic_endpoint("http://127.0.0.1:1")).unwrap();
    let failure = provider.complete("sk-ant-x", &completion("Hello", 10)).await.unwrap_err();

    assert_eq!(failure, ProviderFailure::Network(NO_RESPONSE_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({"content": []}));
        })
        .await;

    let provider = AnthropicProvider::new(&anthropic_endpoint(&server.base_url())).unwrap();
    let mut request = completion("Hello", 10);
    request.timeout = Duration::from_millis(50);

    let failure = provider.complete("sk-ant-x", &request).await.unwrap_err();
    assert_eq!(failure.tag(), "network_error");
}

#[tokio::test]
async fn test_unsendable_credential_is_format_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(json!({"content": []}));
        })
        .await;

    let provider = AnthropicProvider::new(&anthropic_endpoint(&server.base_url())).unwrap();
    let failure = provider
        .complete("sk-ant-bad\nkey", &completion("Hello", 10))
        .await
        .unwrap_err();

    assert_eq!(failure.tag(), "format_error");
    assert_eq!(failure.message(), REQUEST_BUILD_MESSAGE);
    assert!(!failure.message().contains("builder"));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_success_status_with_plain_text_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).body("OK");
        })
        .await;

    let provider = AnthropicProvider::new(&anthropic_endpoint(&server.base_url())).unwrap();
    let response = provider
        .complete("sk-ant-test-1234", &completion("Hello", 10))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.body.is_null());
    assert_eq!(response.text(), "");
}

#[tokio::test]
async fn test_openai_success_uses_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test-5678")
                .body_contains("\"model\":\"gpt-3.5-turbo\"")
                .body_contains("\"max_tokens\":5");
            then.status(200).json_body(json!({
                "id": "chatcmpl-1",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "Hi there"}, "finish_reason": "stop"}
                ]
            }));
        })
        .await;

    let provider = OpenAIProvider::new(&openai_endpoint(&server.base_url())).unwrap();
    let response = provider.complete("sk-test-5678", &completion("Hello", 5)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.text(), "Hi there");
}

#[tokio::test]
async fn test_openai_api_key_type_is_auth() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).json_body(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_api_key", "code": "invalid_api_key"}
            }));
        })
        .await;

    let provider = OpenAIProvider::new(&openai_endpoint(&server.base_url())).unwrap();
    let failure = provider.complete("sk-wrong", &completion("Hello", 5)).await.unwrap_err();

    assert_eq!(failure, ProviderFailure::Auth("Incorrect API key provided".to_string()));
}
