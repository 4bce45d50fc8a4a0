use std::sync::Arc;

use assistant::{
    testing::{Call, FakeAssistantsService, ScriptedTransport},
    AssistantConfig,
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use cvchat_web::{app, AppState, ALLOW_HEADERS};
use serde_json::{json, Value};
use test_log::test;
use tower::ServiceExt;

fn router(transport: Arc<ScriptedTransport>, config: AssistantConfig) -> Router {
    app(Arc::new(AppState::new(transport, config)))
}

fn post_chat(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test(tokio::test)]
async fn preflight_echoes_cors_headers() {
    let transport = FakeAssistantsService::default().into_transport();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/chat")
        .body(Body::empty())
        .unwrap();

    let response = router(transport.clone(), AssistantConfig::new("key"))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!("*", response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN]);
    assert_eq!(
        ALLOW_HEADERS,
        response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS]
    );
    assert!(transport.requests().is_empty());
}

#[test(tokio::test)]
async fn replies_with_assistant_text() {
    let transport = FakeAssistantsService {
        initial_status: "completed".to_string(),
        ..FakeAssistantsService::replying("They know Rust and Kotlin.")
    }
    .into_transport();
    let body = json!({ "message": "What languages does the candidate know?" }).to_string();

    let response = router(transport.clone(), AssistantConfig::new("key"))
        .oneshot(post_chat(body))
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!("*", response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN]);
    assert_eq!(
        json!({ "reply": "They know Rust and Kotlin." }),
        read_json(response).await
    );
    assert_eq!(1, transport.count(Call::ListMessages));
}

#[test(tokio::test)]
async fn missing_message_is_bad_request() {
    let transport = FakeAssistantsService::default().into_transport();

    let response = router(transport.clone(), AssistantConfig::new("key"))
        .oneshot(post_chat(json!({ "assistantId": "asst_1" }).to_string()))
        .await
        .unwrap();

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    assert_eq!(json!({ "error": "Message is required" }), read_json(response).await);
    assert!(transport.requests().is_empty());
}

#[test(tokio::test)]
async fn malformed_body_is_server_error() {
    let transport = FakeAssistantsService::default().into_transport();

    let response = router(transport.clone(), AssistantConfig::new("key"))
        .oneshot(post_chat("{not json"))
        .await
        .unwrap();

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
    assert!(transport.requests().is_empty());
}

#[test(tokio::test)]
async fn missing_credential_is_server_error() {
    let transport = FakeAssistantsService::default().into_transport();

    let response = router(transport.clone(), AssistantConfig::default())
        .oneshot(post_chat(json!({ "message": "hi" }).to_string()))
        .await
        .unwrap();

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
    assert_eq!(
        json!({ "error": "Azure OpenAI API key not configured" }),
        read_json(response).await
    );
    assert!(transport.requests().is_empty());
}

#[test(tokio::test)]
async fn upstream_failure_is_server_error() {
    let transport = FakeAssistantsService::default()
        .failing_on(Call::CreateThread)
        .into_transport();

    let response = router(transport.clone(), AssistantConfig::new("key"))
        .oneshot(post_chat(
            json!({ "message": "hi", "assistantId": "asst_1" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
    assert_eq!(json!({ "error": "Failed to create thread" }), read_json(response).await);
    assert_eq!(vec![Call::CreateThread], transport.calls());
}

#[test(tokio::test)]
async fn health_check_responds_ok() {
    let transport = FakeAssistantsService::default().into_transport();
    let request = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let response = router(transport, AssistantConfig::default())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());
}
