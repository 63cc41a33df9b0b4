//! Integration tests for the OpenAI provider
//!
//! Tests `OpenAiProvider` against a `wiremock` mock server standing in for
//! the chat-completion API.

use lexqa::config::OpenAiConfig;
use lexqa::error::QaError;
use lexqa::providers::{OpenAiProvider, Provider};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn make_provider(base: &str) -> OpenAiProvider {
    let config = OpenAiConfig {
        api_base: format!("{}/v1", base),
        api_key: None,
        timeout_seconds: 5,
    };
    OpenAiProvider::new(
        config,
        "sk-test".to_string(),
        vec!["gpt-3.5-turbo".to_string(), "gpt-4".to_string()],
    )
    .expect("provider should build")
}

#[tokio::test]
async fn test_answer_sends_single_user_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4",
            "choices": [{"message": {"role": "assistant", "content": "罰鍰新臺幣三千元。"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());
    let answer = provider
        .answer("闖紅燈的處罰規定是什麼？", "gpt-4", 0.3)
        .await
        .expect("answer should succeed");

    assert_eq!(answer.text, "罰鍰新臺幣三千元。");
    assert_eq!(answer.model, "gpt-4");
    let usage = answer.usage.expect("usage should be reported");
    assert_eq!(usage.prompt_tokens, 12);
    assert_eq!(usage.completion_tokens, 8);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "gpt-4");
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "闖紅燈的處罰規定是什麼？");
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "code": "invalid_api_key"}
        })))
        .mount(&server)
        .await;

    let err = make_provider(&server.uri())
        .answer("question", "gpt-3.5-turbo", 0.7)
        .await
        .unwrap_err();

    match err {
        QaError::Authentication(message) => assert!(message.contains("Incorrect API key")),
        other => panic!("expected Authentication, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let err = make_provider(&server.uri())
        .answer("question", "gpt-3.5-turbo", 0.7)
        .await
        .unwrap_err();

    match err {
        QaError::Upstream(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("internal error"));
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn test_model_not_found_maps_to_invalid_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "The model `gpt-4` does not exist", "code": "model_not_found"}
        })))
        .mount(&server)
        .await;

    let err = make_provider(&server.uri())
        .answer("question", "gpt-4", 0.7)
        .await
        .unwrap_err();

    assert!(matches!(err, QaError::InvalidModel(_)));
}

#[tokio::test]
async fn test_empty_choices_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = make_provider(&server.uri())
        .answer("question", "gpt-3.5-turbo", 0.7)
        .await
        .unwrap_err();

    assert!(matches!(err, QaError::Upstream(_)));
}

#[tokio::test]
async fn test_validation_happens_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = make_provider(&server.uri());

    assert!(matches!(
        provider.answer("   ", "gpt-4", 0.7).await,
        Err(QaError::EmptyInput)
    ));
    assert!(matches!(
        provider.answer("question", "gpt-9", 0.7).await,
        Err(QaError::InvalidModel(_))
    ));
}
