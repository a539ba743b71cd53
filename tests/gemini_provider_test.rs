// ABOUTME: Integration tests for the Gemini provider against a local mock endpoint
// ABOUTME: Verifies request shape, key placement, response parsing and status mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::{Arc, Mutex};

use axum::{
    http::{HeaderMap, StatusCode, Uri},
    Router,
};
use common::{build_service, sample_submission, WRAPPED_COMPLETION};
use nutriplan_server::errors::ErrorCode;
use nutriplan_server::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
use nutriplan_server::recommendations::{GenerationOptions, RecommendationSource};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Last request the mock received
#[derive(Clone)]
struct Seen {
    uri: String,
    api_key: Option<String>,
    body: Value,
}

type Captured = Arc<Mutex<Option<Seen>>>;

/// Serve a fixed status and body on an ephemeral port, returning its base URL
async fn spawn_mock(status: StatusCode, body: String) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);

    let app = Router::new().fallback(
        move |uri: Uri, headers: HeaderMap, request_body: String| {
            let sink = Arc::clone(&sink);
            let body = body.clone();
            async move {
                let api_key = headers
                    .get("x-goog-api-key")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned);
                *sink.lock().unwrap() = Some(Seen {
                    uri: uri.to_string(),
                    api_key,
                    body: serde_json::from_str(&request_body).unwrap_or(Value::Null),
                });
                (status, body)
            }
        },
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{address}/v1beta/"), captured)
}

fn completion_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 30, "totalTokenCount": 42}
    })
    .to_string()
}

#[tokio::test]
async fn test_completion_request_and_response() {
    let (base_url, captured) = spawn_mock(StatusCode::OK, completion_body("Eat more greens")).await;
    let provider = GeminiProvider::new("mock-key")
        .with_base_url(base_url)
        .with_default_model("gemini-test");

    let request = ChatRequest::new(vec![
        ChatMessage::system("You are a nutritionist"),
        ChatMessage::user("Suggest a dinner"),
    ])
    .with_temperature(0.3);
    let response = provider.complete(&request).await.unwrap();

    assert_eq!(response.content, "Eat more greens");
    assert_eq!(response.model, "gemini-test");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.usage.unwrap().total_tokens, 42);

    let seen = captured.lock().unwrap().clone().unwrap();
    assert_eq!(seen.uri, "/v1beta/models/gemini-test:generateContent");
    assert_eq!(seen.api_key.as_deref(), Some("mock-key"));
    assert_eq!(seen.body["contents"][0]["parts"][0]["text"], "Suggest a dinner");
    assert_eq!(
        seen.body["systemInstruction"]["parts"][0]["text"],
        "You are a nutritionist"
    );
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let (base_url, captured) = spawn_mock(StatusCode::OK, completion_body("ok")).await;
    let provider = GeminiProvider::new("k").with_base_url(base_url);

    let request = ChatRequest::new(vec![ChatMessage::user("hi")]).with_model("other-model");
    provider.complete(&request).await.unwrap();

    let seen = captured.lock().unwrap().clone().unwrap();
    assert_eq!(seen.uri, "/v1beta/models/other-model:generateContent");
}

#[tokio::test]
async fn test_status_codes_map_to_error_codes() {
    let cases = [
        (StatusCode::TOO_MANY_REQUESTS, ErrorCode::ExternalRateLimited),
        (StatusCode::FORBIDDEN, ErrorCode::ExternalAuthFailed),
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::ExternalServiceError),
    ];

    for (status, expected) in cases {
        let body = json!({"error": {"message": "upstream says no"}}).to_string();
        let (base_url, _) = spawn_mock(status, body).await;
        let provider = GeminiProvider::new("k").with_base_url(base_url);

        let error = provider
            .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
            .await
            .unwrap_err();
        assert_eq!(error.code, expected, "status {status}");
        assert!(error.message.contains("upstream says no"));
    }
}

#[tokio::test]
async fn test_empty_candidates_is_an_error() {
    let (base_url, _) = spawn_mock(StatusCode::OK, json!({"candidates": []}).to_string()).await;
    let provider = GeminiProvider::new("k").with_base_url(base_url);

    let error = provider
        .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    // Bind then drop to obtain a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let provider = GeminiProvider::new("k").with_base_url(format!("http://{address}"));
    let error = provider
        .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_transport_errors_do_not_expose_api_key() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let provider =
        GeminiProvider::new("SUPERSECRETKEY123").with_base_url(format!("http://{address}"));

    let error = provider
        .complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert!(!error.message.contains("SUPERSECRETKEY123"), "{}", error.message);
    assert!(!error.to_string().contains("SUPERSECRETKEY123"));

    let error = provider.health_check().await.unwrap_err();
    assert!(!error.message.contains("SUPERSECRETKEY123"), "{}", error.message);
}

#[tokio::test]
async fn test_health_check_lists_models() {
    let (base_url, captured) = spawn_mock(StatusCode::OK, json!({"models": []}).to_string()).await;
    let provider = GeminiProvider::new("k").with_base_url(base_url);

    assert!(provider.health_check().await.unwrap());
    let seen = captured.lock().unwrap().clone().unwrap();
    assert_eq!(seen.uri, "/v1beta/models");
    assert_eq!(seen.api_key.as_deref(), Some("k"));
}

#[tokio::test]
async fn test_pipeline_over_gemini() {
    let (base_url, _) = spawn_mock(StatusCode::OK, completion_body(WRAPPED_COMPLETION)).await;
    let provider = Arc::new(GeminiProvider::new("k").with_base_url(base_url));
    let (service, _cache) = build_service(provider, 100, GenerationOptions::default());

    let outcome = service.recommend(&sample_submission()).await;
    assert_eq!(outcome.source, RecommendationSource::Generated);
    assert_eq!(outcome.record.lunch[0].name, "Rajma Chawal");
}
