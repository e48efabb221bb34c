//! MCP Tools
//!
//! One translator per CMS operation, grouped by resource.

pub mod audio;
pub mod episodes;
pub mod feed;
pub mod people;
pub mod series;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::protocol::{McpError, ToolsCallResult};
use super::registry::McpRegistry;
use crate::cms::{CmsError, CmsPage};

/// Register all tools with the registry
pub fn register_all_tools(registry: &mut McpRegistry) {
    episodes::register_tools(registry);
    series::register_tools(registry);
    people::register_tools(registry);
    audio::register_tools(registry);
    feed::register_tools(registry);
}

/// A CMS failure surfaced as a business error, raw payload included.
pub(crate) fn cms_failure(err: CmsError) -> ToolsCallResult {
    ToolsCallResult::error(err.tool_message())
}

/// Decode the `data` document of a CMS response into a typed view.
pub(crate) fn decode_data<T: DeserializeOwned>(page: &CmsPage) -> Result<T, McpError> {
    let data = page.body.get("data").cloned().unwrap_or(Value::Null);
    serde_json::from_value(data)
        .map_err(|e| McpError::InternalError(format!("Unexpected CMS document: {}", e)))
}

/// Decode a list of aggregated CMS documents into typed views.
pub(crate) fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, McpError> {
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| McpError::InternalError(format!("Unexpected CMS document: {}", e)))
        })
        .collect()
}
