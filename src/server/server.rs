use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::info;

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::{log_requests, state::AppState, ServerConfig};
use crate::cms::CmsClient;
use crate::mcp::handler::{create_mcp_state, mcp_handler, McpState};
use crate::mcp::session::SessionStore;

pub fn server_version() -> String {
    format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"))
}

#[derive(Serialize)]
struct HealthResponse {
    pub status: &'static str,
    pub uptime: String,
    pub version: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Liveness endpoint. Deliberately session-less so load balancers and
/// humans can poke it.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime: format_uptime(state.start_time.elapsed()),
        version: state.version.clone(),
    })
}

/// Build the application router. Split from `run_server` so tests can mount
/// it on their own listener.
pub fn make_app(
    config: ServerConfig,
    cms: Arc<CmsClient>,
    session_store: Arc<dyn SessionStore>,
    mcp_state: Arc<McpState>,
) -> Router {
    let state = AppState {
        config,
        start_time: Instant::now(),
        cms,
        session_store,
        mcp_state,
        version: server_version(),
    };

    Router::new()
        .route("/mcp", post(mcp_handler))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

pub async fn run_server(
    config: ServerConfig,
    cms: Arc<CmsClient>,
    session_store: Arc<dyn SessionStore>,
) -> Result<()> {
    let port = config.port;
    let mcp_state = Arc::new(create_mcp_state());
    let tool_count = mcp_state.registry.tool_count();

    let app = make_app(config, cms, session_store, mcp_state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    let bound = listener.local_addr()?;

    info!(port = bound.port(), tools = tool_count, "Serving MCP");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
