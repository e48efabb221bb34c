use axum::extract::FromRef;

use crate::cms::CmsClient;
use crate::mcp::handler::McpState;
use crate::mcp::session::SessionStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCmsClient = Arc<CmsClient>;
pub type GuardedSessionStore = Arc<dyn SessionStore>;
pub type GuardedMcpState = Arc<McpState>;

#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub cms: GuardedCmsClient,
    pub session_store: GuardedSessionStore,
    pub mcp_state: GuardedMcpState,
    pub version: String,
}

impl FromRef<AppState> for ServerConfig {
    fn from_ref(input: &AppState) -> Self {
        input.config.clone()
    }
}

impl FromRef<AppState> for GuardedCmsClient {
    fn from_ref(input: &AppState) -> Self {
        input.cms.clone()
    }
}

impl FromRef<AppState> for GuardedSessionStore {
    fn from_ref(input: &AppState) -> Self {
        input.session_store.clone()
    }
}

impl FromRef<AppState> for GuardedMcpState {
    fn from_ref(input: &AppState) -> Self {
        input.mcp_state.clone()
    }
}
