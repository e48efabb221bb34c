//! MCP client for end-to-end tests
//!
//! Wraps reqwest with envelope construction and session-header handling.
//! When the wire format changes, update only this file.

use podhaven_mcp_server::mcp::SESSION_HEADER;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

use super::constants::REQUEST_TIMEOUT_SECS;

/// MCP test client carrying an optional session id
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    session_id: Option<String>,
    next_request_id: std::cell::Cell<i64>,
}

impl TestClient {
    /// Creates a client with no session
    ///
    /// Use this for testing the handshake itself. For most tests, use
    /// `initialized()` instead.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            session_id: None,
            next_request_id: std::cell::Cell::new(1),
        }
    }

    /// Creates a client that has already performed the handshake
    ///
    /// # Panics
    ///
    /// Panics if the handshake fails (indicates test infrastructure problem).
    pub async fn initialized(base_url: String) -> Self {
        let mut client = Self::new(base_url);
        let session_id = client.initialize().await;
        client.session_id = Some(session_id);
        client
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn set_session_id(&mut self, session_id: Option<String>) {
        self.session_id = session_id;
    }

    fn request_id(&self) -> i64 {
        let id = self.next_request_id.get();
        self.next_request_id.set(id + 1);
        id
    }

    // ========================================================================
    // Envelope plumbing
    // ========================================================================

    /// POST a raw body to the MCP endpoint
    pub async fn post_raw(&self, body: String) -> Response {
        let mut request = self
            .client
            .post(format!("{}/mcp", self.base_url))
            .header("content-type", "application/json")
            .body(body);
        if let Some(session_id) = &self.session_id {
            request = request.header(SESSION_HEADER, session_id.as_str());
        }
        request.send().await.expect("MCP request failed")
    }

    /// POST a JSON-RPC envelope and return the raw response
    pub async fn rpc_response(&self, method: &str, params: Value) -> Response {
        let envelope = json!({
            "jsonrpc": "2.0",
            "id": self.request_id(),
            "method": method,
            "params": params,
        });
        self.post_raw(envelope.to_string()).await
    }

    /// POST a JSON-RPC envelope and return the parsed response envelope
    pub async fn rpc(&self, method: &str, params: Value) -> Value {
        self.rpc_response(method, params)
            .await
            .json()
            .await
            .expect("MCP response was not JSON")
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Perform the handshake and return the issued session id
    ///
    /// # Panics
    ///
    /// Panics if no session header comes back.
    pub async fn initialize(&self) -> String {
        let response = self
            .rpc_response(
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "e2e-tests", "version": "0.0.0" }
                }),
            )
            .await;

        response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .expect("initialize did not return a session header")
    }

    // ========================================================================
    // Tools
    // ========================================================================

    pub async fn list_tools(&self) -> Value {
        self.rpc("tools/list", json!({})).await
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Value {
        self.rpc("tools/call", json!({ "name": name, "arguments": arguments }))
            .await
    }

    // ========================================================================
    // Health
    // ========================================================================

    pub async fn health(&self) -> Response {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .expect("Health request failed")
    }
}

// ============================================================================
// Envelope assertions
// ============================================================================

/// Extract the text content of a tool call result, asserting it succeeded
pub fn tool_ok_json(envelope: &Value) -> Value {
    assert!(
        envelope.get("error").is_none(),
        "expected tool success, got protocol error: {}",
        envelope
    );
    let result = &envelope["result"];
    assert_ne!(
        result["is_error"],
        json!(true),
        "expected tool success, got tool error: {}",
        result
    );
    let text = result["content"][0]["text"]
        .as_str()
        .expect("tool result has no text content");
    serde_json::from_str(text).expect("tool result text was not JSON")
}

/// Extract the error text of a tool call result, asserting it failed as a
/// business error (not a protocol error)
pub fn tool_error_text(envelope: &Value) -> String {
    assert!(
        envelope.get("error").is_none(),
        "expected tool-level error, got protocol error: {}",
        envelope
    );
    let result = &envelope["result"];
    assert_eq!(
        result["is_error"],
        json!(true),
        "expected tool-level error, got success: {}",
        result
    );
    result["content"][0]["text"]
        .as_str()
        .expect("tool error has no text content")
        .to_string()
}

/// Extract the protocol error code of a response envelope
pub fn protocol_error_code(envelope: &Value) -> i64 {
    envelope["error"]["code"]
        .as_i64()
        .unwrap_or_else(|| panic!("expected protocol error, got: {}", envelope))
}
