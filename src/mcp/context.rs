//! MCP Tool Execution Context
//!
//! Provides access to the upstream client for tool implementations.

use std::sync::Arc;
use std::time::Instant;

use crate::cms::CmsClient;

/// Context provided to tool handlers during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Client for the Podhaven CMS API
    pub cms: Arc<CmsClient>,

    /// Server version info
    pub server_version: String,

    /// Server start time (for uptime calculation)
    pub start_time: Instant,
}
