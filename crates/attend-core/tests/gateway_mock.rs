//! Integration tests for the HTTP request gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use attend_core::ApiErrorKind;
use attend_core::gateway::Gateway;
use attend_core::session::events::SessionEvents;
use reqwest::Method;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> (Gateway, Arc<SessionEvents>) {
    let events = Arc::new(SessionEvents::default());
    (Gateway::new(server.uri(), Arc::clone(&events)), events)
}

#[tokio::test]
async fn request_serializes_body_and_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "email": "a@b.c" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _) = gateway(&server);
    let body = serde_json::json!({ "email": "a@b.c" });
    let payload = gateway
        .request(Method::POST, "/login", Some(&body))
        .await
        .unwrap();
    assert_eq!(payload["ok"], 1);
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({ "error": "Email already exists" })),
        )
        .mount(&server)
        .await;

    let (gateway, _) = gateway(&server);
    let err = gateway
        .request(Method::GET, "/employees", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Status);
    assert_eq!(err.message, "Email already exists");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let (gateway, _) = gateway(&server);
    let err = gateway
        .request(Method::GET, "/employees", None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "HTTP error! status: 500");
}

#[tokio::test]
async fn unauthorized_emits_token_expired_signal_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "error": "Unauthorized" })),
        )
        .mount(&server)
        .await;

    let (gateway, events) = gateway(&server);
    let signals = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&signals);
    events.on_token_expired(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    let err = gateway
        .request_with_auth(Method::GET, "/me", "stale-token", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.message, "Unauthorized");
    assert_eq!(signals.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bearer_header_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "employee_id": 1 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _) = gateway(&server);
    gateway
        .request_with_auth(Method::GET, "/me", "tok-123", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn connection_failure_becomes_transport_error() {
    // nothing listens here; the gateway must fold the failure into the
    // envelope instead of propagating a panic or raw reqwest error
    let events = Arc::new(SessionEvents::default());
    let gateway = Gateway::new("http://127.0.0.1:9", events);
    let err = gateway
        .request(Method::GET, "/healthz", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Transport);
}
