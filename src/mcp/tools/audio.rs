//! Audio Version and Marker Tools
//!
//! Audio versions are the playable renditions of an episode; markers are
//! the timed points (preroll, midroll, postroll) cut into one of them.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{cms_failure, decode_data, decode_items};
use crate::cms::aliases::resolve_marker_kind;
use crate::cms::models::{AudioVersion, Marker};
use crate::cms::pagination::list_all;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register audio version and marker tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(audio_version_list_tool());
    registry.register_tool(audio_version_get_tool());
    registry.register_tool(audio_version_create_tool());
    registry.register_tool(audio_version_delete_tool());
    registry.register_tool(marker_list_tool());
    registry.register_tool(marker_create_tool());
    registry.register_tool(marker_update_tool());
    registry.register_tool(marker_delete_tool());
}

// ============================================================================
// audio_version.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct AudioVersionListParams {
    #[serde(default)]
    episode_id: Option<String>,
}

fn audio_version_list_tool() -> RegisteredTool {
    ToolBuilder::new("audio_version.list")
        .description("List the audio versions of an episode")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "episode_id": {
                    "type": "string",
                    "description": "Episode id"
                }
            },
            "required": ["episode_id"]
        }))
        .build(audio_version_list_handler)
}

async fn audio_version_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: AudioVersionListParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let episode_id = match params.episode_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("episode_id is required")),
    };

    let filters = vec![("episode_id".to_string(), episode_id)];
    let items = match list_all(&ctx.cms, "/audio_versions", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let audio_versions: Vec<AudioVersion> = decode_items(items)?;

    let result = json!({
        "audio_versions": audio_versions,
        "total": audio_versions.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// audio_version.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct AudioVersionGetParams {
    #[serde(default)]
    id: Option<String>,
}

fn audio_version_get_tool() -> RegisteredTool {
    ToolBuilder::new("audio_version.get")
        .description("Get a single audio version by id")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Audio version id"
                }
            },
            "required": ["id"]
        }))
        .build(audio_version_get_handler)
}

async fn audio_version_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: AudioVersionGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let page = match ctx.cms.get(&format!("/audio_versions/{}", id), &[]).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let audio_version: AudioVersion = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "audio_version": audio_version }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// audio_version.create
// ============================================================================

#[derive(Debug, Deserialize)]
struct AudioVersionCreateParams {
    #[serde(default)]
    episode_id: Option<String>,
    #[serde(default)]
    audio_url: Option<String>,
    #[serde(default)]
    kind: Option<String>,
}

fn audio_version_create_tool() -> RegisteredTool {
    ToolBuilder::new("audio_version.create")
        .description("Create an audio version for an episode from a source URL")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "episode_id": {
                    "type": "string",
                    "description": "Episode the audio belongs to"
                },
                "audio_url": {
                    "type": "string",
                    "description": "URL the platform ingests the audio from"
                },
                "kind": {
                    "type": "string",
                    "description": "Version kind, e.g. full_mix or ad_free"
                }
            },
            "required": ["episode_id", "audio_url"]
        }))
        .build(audio_version_create_handler)
}

async fn audio_version_create_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: AudioVersionCreateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let episode_id = match params.episode_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("episode_id is required")),
    };
    let audio_url = match params.audio_url {
        Some(url) => url,
        None => return Ok(ToolsCallResult::error("audio_url is required")),
    };

    let mut body = Map::new();
    body.insert("episode_id".to_string(), json!(episode_id));
    body.insert("audio_url".to_string(), json!(audio_url));
    if let Some(kind) = params.kind {
        body.insert("kind".to_string(), json!(kind));
    }

    let page = match ctx.cms.post("/audio_versions", Value::Object(body)).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let audio_version: AudioVersion = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "audio_version": audio_version }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// audio_version.delete
// ============================================================================

#[derive(Debug, Deserialize)]
struct AudioVersionDeleteParams {
    #[serde(default)]
    id: Option<String>,
}

fn audio_version_delete_tool() -> RegisteredTool {
    ToolBuilder::new("audio_version.delete")
        .description("Delete an audio version. This cannot be undone.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Audio version id"
                }
            },
            "required": ["id"]
        }))
        .build(audio_version_delete_handler)
}

async fn audio_version_delete_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: AudioVersionDeleteParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    if let Err(err) = ctx.cms.delete(&format!("/audio_versions/{}", id)).await {
        return Ok(cms_failure(err));
    }

    ToolsCallResult::json(&json!({ "deleted": true, "id": id }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// marker.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct MarkerListParams {
    #[serde(default)]
    audio_version_id: Option<String>,
}

fn marker_list_tool() -> RegisteredTool {
    ToolBuilder::new("marker.list")
        .description("List the markers cut into an audio version")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "audio_version_id": {
                    "type": "string",
                    "description": "Audio version id"
                }
            },
            "required": ["audio_version_id"]
        }))
        .build(marker_list_handler)
}

async fn marker_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: MarkerListParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let audio_version_id = match params.audio_version_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("audio_version_id is required")),
    };

    let filters = vec![("audio_version_id".to_string(), audio_version_id)];
    let items = match list_all(&ctx.cms, "/markers", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let markers: Vec<Marker> = decode_items(items)?;

    let result = json!({
        "markers": markers,
        "total": markers.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// marker.create
// ============================================================================

#[derive(Debug, Deserialize)]
struct MarkerCreateParams {
    #[serde(default)]
    audio_version_id: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    offset_ms: Option<u64>,
    #[serde(default)]
    label: Option<String>,
}

fn marker_create_tool() -> RegisteredTool {
    ToolBuilder::new("marker.create")
        .description(
            "Place a marker in an audio version. Kind accepts pre/mid/post \
             shorthands for preroll/midroll/postroll.",
        )
        .input_schema(json!({
            "type": "object",
            "properties": {
                "audio_version_id": {
                    "type": "string",
                    "description": "Audio version to mark"
                },
                "kind": {
                    "type": "string",
                    "description": "Marker kind: preroll, midroll, postroll (or pre/mid/post)"
                },
                "offset_ms": {
                    "type": "integer",
                    "description": "Offset from the start of the audio, in milliseconds"
                },
                "label": {
                    "type": "string"
                }
            },
            "required": ["audio_version_id", "kind", "offset_ms"]
        }))
        .build(marker_create_handler)
}

async fn marker_create_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: MarkerCreateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let audio_version_id = match params.audio_version_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("audio_version_id is required")),
    };
    let kind = match params.kind {
        Some(kind) => resolve_marker_kind(&kind),
        None => return Ok(ToolsCallResult::error("kind is required")),
    };
    let offset_ms = match params.offset_ms {
        Some(offset) => offset,
        None => return Ok(ToolsCallResult::error("offset_ms is required")),
    };

    let mut body = Map::new();
    body.insert("audio_version_id".to_string(), json!(audio_version_id));
    body.insert("kind".to_string(), json!(kind));
    body.insert("offset_ms".to_string(), json!(offset_ms));
    if let Some(label) = params.label {
        body.insert("label".to_string(), json!(label));
    }

    let page = match ctx.cms.post("/markers", Value::Object(body)).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let marker: Marker = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "marker": marker }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// marker.update
// ============================================================================

#[derive(Debug, Deserialize)]
struct MarkerUpdateParams {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    offset_ms: Option<u64>,
    #[serde(default)]
    label: Option<String>,
}

fn marker_update_tool() -> RegisteredTool {
    ToolBuilder::new("marker.update")
        .description("Move or relabel a marker")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Marker id"
                },
                "kind": {
                    "type": "string",
                    "description": "Marker kind: preroll, midroll, postroll (or pre/mid/post)"
                },
                "offset_ms": {
                    "type": "integer"
                },
                "label": {
                    "type": "string"
                }
            },
            "required": ["id"]
        }))
        .build(marker_update_handler)
}

async fn marker_update_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: MarkerUpdateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let mut body = Map::new();
    if let Some(kind) = params.kind {
        body.insert("kind".to_string(), json!(resolve_marker_kind(&kind)));
    }
    if let Some(offset_ms) = params.offset_ms {
        body.insert("offset_ms".to_string(), json!(offset_ms));
    }
    if let Some(label) = params.label {
        body.insert("label".to_string(), json!(label));
    }

    if body.is_empty() {
        return Ok(ToolsCallResult::error("at least one field to update is required"));
    }

    let page = match ctx
        .cms
        .patch(&format!("/markers/{}", id), Value::Object(body))
        .await
    {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let marker: Marker = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "marker": marker }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// marker.delete
// ============================================================================

#[derive(Debug, Deserialize)]
struct MarkerDeleteParams {
    #[serde(default)]
    id: Option<String>,
}

fn marker_delete_tool() -> RegisteredTool {
    ToolBuilder::new("marker.delete")
        .description("Remove a marker")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Marker id"
                }
            },
            "required": ["id"]
        }))
        .build(marker_delete_handler)
}

async fn marker_delete_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: MarkerDeleteParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    if let Err(err) = ctx.cms.delete(&format!("/markers/{}", id)).await {
        return Ok(cms_failure(err));
    }

    ToolsCallResult::json(&json!({ "deleted": true, "id": id }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}
