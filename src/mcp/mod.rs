//! MCP (Model Context Protocol) Server
//!
//! Exposes the Podhaven CMS as a set of callable tools so an LLM client can
//! operate the content platform without per-endpoint integration code.
//!
//! ## Architecture
//!
//! - Transport: JSON-RPC envelope over POST at `/mcp`
//! - Sessions: issued on `initialize` via the `Mcp-Session-Id` header,
//!   required on every other call
//! - Tools: one thin translator per CMS operation

pub mod context;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod session;
pub mod tools;

pub use handler::{create_mcp_state, mcp_handler, McpState, SESSION_HEADER};
pub use protocol::{McpError, McpRequest, McpResponse};
pub use registry::McpRegistry;
pub use session::{InMemorySessionStore, SessionStore};
