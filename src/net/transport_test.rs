use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::storage::MemoryStorage;

fn transport_for(server: &MockServer, storage: Arc<MemoryStorage>) -> Transport {
    let config = ClientConfig::new(&server.uri());
    Transport::new(&config, storage).unwrap()
}

#[derive(Debug, serde::Deserialize)]
struct Pong {
    ok: bool,
}

// =============================================================
// Credential injection
// =============================================================

#[tokio::test]
async fn attaches_bearer_token_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, Arc::new(MemoryStorage::with_token("tok-1")));
    let pong: Pong = transport.get("/v1/ping").await.unwrap();
    assert!(pong.ok);
}

#[tokio::test]
async fn sends_anonymously_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .mount(&server)
        .await;

    let transport = transport_for(&server, Arc::new(MemoryStorage::new()));
    let _: Pong = transport.get("/v1/ping").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn sets_json_content_type_on_posts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/echo"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server, Arc::new(MemoryStorage::new()));
    let _: Pong = transport.post("/v1/echo", &serde_json::json!({ "x": 1 })).await.unwrap();
}

// =============================================================
// 401 teardown
// =============================================================

#[tokio::test]
async fn unauthorized_clears_session_and_fires_hook() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::with_token("stale"));
    storage.set_user_json(r#"{"id":"u1"}"#);

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_clone = Arc::clone(&fired);
    let transport = transport_for(&server, Arc::clone(&storage)).with_session_expired(Box::new(
        move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        },
    ));

    let err = transport.get::<Pong>("/v1/ping").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(storage.token().is_none());
    assert!(storage.user_json().is_none());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unauthorized_without_hook_still_clears() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::with_token("stale"));
    let transport = transport_for(&server, Arc::clone(&storage));

    let err = transport.get::<Pong>("/v1/ping").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(storage.token().is_none());
}

// =============================================================
// Error normalization
// =============================================================

#[tokio::test]
async fn non_2xx_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({ "error": "not your turn" })),
        )
        .mount(&server)
        .await;

    let transport = transport_for(&server, Arc::new(MemoryStorage::new()));
    let err = transport.get::<Pong>("/v1/ping").await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 409, .. }));
    assert_eq!(err.server_message(), Some("not your turn"));
}

#[tokio::test]
async fn non_2xx_with_unparseable_body_has_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let transport = transport_for(&server, Arc::new(MemoryStorage::new()));
    let err = transport.get::<Pong>("/v1/ping").await.unwrap_err();
    assert!(err.server_message().is_none());
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let transport = transport_for(&server, Arc::new(MemoryStorage::new()));
    let err = transport.get::<Pong>("/v1/ping").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================
// Error-body extraction
// =============================================================

#[test]
fn extract_error_message_reads_error_field() {
    assert_eq!(
        extract_error_message(r#"{"error": "game not found"}"#),
        Some("game not found".to_owned())
    );
}

#[test]
fn extract_error_message_tolerates_garbage() {
    assert_eq!(extract_error_message("<html>"), None);
    assert_eq!(extract_error_message("{}"), None);
    assert_eq!(extract_error_message(r#"{"error": ""}"#), None);
}
