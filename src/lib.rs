//! Podhaven MCP Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod cms;
pub mod config;
pub mod mcp;
pub mod server;

// Re-export commonly used types for convenience
pub use cms::{CmsClient, CmsError};
pub use config::{AppConfig, CliConfig, FileConfig};
pub use mcp::{InMemorySessionStore, McpRegistry, SessionStore, SESSION_HEADER};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
