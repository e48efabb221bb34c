//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{tool_ok_json, TestClient, TestServer, SERIES_SMALL};
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_list_episodes() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::initialized(server.base_url.clone()).await;
//!
//!     let response = client
//!         .call_tool("episode.list", json!({ "series_id": SERIES_SMALL }))
//!         .await;
//!     let result = tool_ok_json(&response);
//!     assert_eq!(result["total"], 3);
//! }
//! ```

mod client;
mod cms_stub;
mod constants;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::{protocol_error_code, tool_error_text, tool_ok_json, TestClient};
#[allow(unused_imports)]
pub use constants::*;
pub use server::TestServer;
