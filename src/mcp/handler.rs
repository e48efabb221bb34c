//! MCP HTTP Handler
//!
//! Accepts the JSON-RPC envelope on a single POST endpoint. `initialize`
//! opens a session and hands its id back in a response header; every other
//! method must present that id. Whatever happens inside a tool, the caller
//! gets a response: translator failures are downgraded to business-error
//! tool results at this boundary and only protocol violations surface as
//! JSON-RPC errors.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::context::ToolContext;
use super::protocol::{
    methods, InitializeParams, InitializeResult, McpError, McpRequest, McpResponse, PingResult,
    ServerCapabilities, ServerInfo, ToolsCallParams, ToolsCallResult, ToolsCapability,
    ToolsListResult, MCP_PROTOCOL_VERSION,
};
use super::registry::McpRegistry;
use crate::server::state::AppState;

/// Header carrying the session id, both directions.
pub const SESSION_HEADER: &str = "Mcp-Session-Id";

/// State shared across MCP requests
pub struct McpState {
    pub registry: Arc<McpRegistry>,
}

/// POST handler for the MCP endpoint
pub async fn mcp_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    // Parse the request
    let request: McpRequest = match serde_json::from_str(&body) {
        Ok(req) => req,
        Err(e) => {
            return Json(McpResponse::error(None, McpError::ParseError(e.to_string())))
                .into_response();
        }
    };

    debug!("MCP request: {}", request.method);

    // Notifications get acknowledged without a body
    if request.method == methods::INITIALIZED {
        return StatusCode::ACCEPTED.into_response();
    }

    let request_id = request.id.clone();

    // The handshake is the only method that does not present a session;
    // it creates one instead.
    if request.method == methods::INITIALIZE {
        let session_id = state.session_store.create();
        let result = handle_initialize(&request, &state).and_then(|value| {
            let header_value = HeaderValue::from_str(&session_id)
                .map_err(|e| McpError::InternalError(format!("Unusable session id: {}", e)))?;
            Ok((value, header_value))
        });
        return match result {
            Ok((value, header_value)) => {
                let mut response = Json(McpResponse::success(request_id, value)).into_response();
                response.headers_mut().insert(SESSION_HEADER, header_value);
                response
            }
            Err(error) => Json(McpResponse::error(request_id, error)).into_response(),
        };
    }

    // Everything else requires a previously issued session
    let presented = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !state.session_store.validate(presented) {
        debug!("Rejected call with invalid session: {:?}", presented);
        return Json(McpResponse::error(request_id, McpError::InvalidSession)).into_response();
    }

    let result = match request.method.as_str() {
        methods::PING => handle_ping(&request),
        methods::TOOLS_LIST => handle_tools_list(&state),
        methods::TOOLS_CALL => handle_tools_call(&request, &state).await,
        other => Err(McpError::MethodNotFound(other.to_string())),
    };

    let response = match result {
        Ok(value) => McpResponse::success(request_id, value),
        Err(error) => McpResponse::error(request_id, error),
    };
    Json(response).into_response()
}

fn handle_initialize(request: &McpRequest, state: &AppState) -> Result<Value, McpError> {
    let _params: Option<InitializeParams> = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let result = InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability { list_changed: None }),
        },
        server_info: ServerInfo {
            name: "podhaven-mcp".to_string(),
            version: state.version.clone(),
        },
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

fn handle_ping(_request: &McpRequest) -> Result<Value, McpError> {
    serde_json::to_value(PingResult {}).map_err(|e| McpError::InternalError(e.to_string()))
}

fn handle_tools_list(state: &AppState) -> Result<Value, McpError> {
    let result = ToolsListResult {
        tools: state.mcp_state.registry.list_tools(),
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_tools_call(request: &McpRequest, state: &AppState) -> Result<Value, McpError> {
    let params: ToolsCallParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    // Protocol-level argument shape check, before any translator runs
    let arguments = match params.arguments {
        None | Some(Value::Null) => serde_json::json!({}),
        Some(value @ Value::Object(_)) => value,
        Some(_) => {
            return Err(McpError::InvalidParams(
                "tool arguments must be a JSON object".to_string(),
            ))
        }
    };

    let tool = state
        .mcp_state
        .registry
        .get_tool(&params.name)
        .ok_or_else(|| McpError::MethodNotFound(format!("Unknown tool: {}", params.name)))?;

    let ctx = ToolContext {
        cms: state.cms.clone(),
        server_version: state.version.clone(),
        start_time: state.start_time,
    };

    // Translator failures never cross the tool boundary as protocol errors
    let result = match (tool.handler)(ctx, arguments).await {
        Ok(result) => result,
        Err(error) => {
            warn!("Tool {} failed: {}", params.name, error.message());
            ToolsCallResult::error(error.message())
        }
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

/// Create the MCP state with all tools registered
pub fn create_mcp_state() -> McpState {
    let mut registry = McpRegistry::new();

    super::tools::register_all_tools(&mut registry);

    info!("MCP registry initialized with {} tools", registry.tool_count());

    McpState {
        registry: Arc::new(registry),
    }
}
