//! End-to-end tests for the session lifecycle
//!
//! Covers the handshake, session-header enforcement, and the session-less
//! health endpoint.

mod common;

use common::{protocol_error_code, TestClient, TestServer};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_initialize_returns_a_session_header() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let session_id = client.initialize().await;

    assert!(!session_id.is_empty());
}

#[tokio::test]
async fn test_initialize_returns_fresh_session_ids() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let first = client.initialize().await;
    let second = client.initialize().await;

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_initialize_reports_server_info() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let envelope = client
        .rpc(
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "e2e-tests", "version": "0.0.0" }
            }),
        )
        .await;

    assert_eq!(envelope["result"]["serverInfo"]["name"], "podhaven-mcp");
    assert!(envelope["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_calls_with_issued_session_succeed() {
    let server = TestServer::spawn().await;
    let client = TestClient::initialized(server.base_url.clone()).await;

    let envelope = client.rpc("ping", json!({})).await;

    assert!(envelope.get("error").is_none());
}

#[tokio::test]
async fn test_calls_without_session_fail_with_invalid_session() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let envelope = client.rpc("tools/list", json!({})).await;

    assert_eq!(protocol_error_code(&envelope), -32001);
}

#[tokio::test]
async fn test_calls_with_unknown_session_fail_with_invalid_session() {
    let server = TestServer::spawn().await;
    let mut client = TestClient::new(server.base_url.clone());
    client.set_session_id(Some("not-a-real-session".to_string()));

    let envelope = client.rpc("tools/list", json!({})).await;

    assert_eq!(protocol_error_code(&envelope), -32001);
}

#[tokio::test]
async fn test_sessions_are_not_shared_across_servers() {
    let server_a = TestServer::spawn().await;
    let server_b = TestServer::spawn().await;

    let client_a = TestClient::initialized(server_a.base_url.clone()).await;
    let mut client_b = TestClient::new(server_b.base_url.clone());
    client_b.set_session_id(client_a.session_id().map(|s| s.to_string()));

    let envelope = client_b.rpc("ping", json!({})).await;

    assert_eq!(protocol_error_code(&envelope), -32001);
}

#[tokio::test]
async fn test_initialized_notification_is_accepted_without_body() {
    let server = TestServer::spawn().await;
    let client = TestClient::initialized(server.base_url.clone()).await;

    let response = client
        .post_raw(
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_health_requires_no_session() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.health().await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}
