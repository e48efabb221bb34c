//! Episode Tools
//!
//! CRUD translators for episodes.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{cms_failure, decode_data, decode_items};
use crate::cms::models::Episode;
use crate::cms::pagination::list_all;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register episode tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(episode_list_tool());
    registry.register_tool(episode_get_tool());
    registry.register_tool(episode_create_tool());
    registry.register_tool(episode_update_tool());
    registry.register_tool(episode_delete_tool());
}

// ============================================================================
// episode.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct EpisodeListParams {
    #[serde(default)]
    series_id: Option<String>,
    #[serde(default)]
    season_id: Option<String>,
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default)]
    published: Option<bool>,
}

fn episode_list_tool() -> RegisteredTool {
    ToolBuilder::new("episode.list")
        .description("List episodes of a series, season, or person, following pagination")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "series_id": {
                    "type": "string",
                    "description": "Filter by series"
                },
                "season_id": {
                    "type": "string",
                    "description": "Filter by season"
                },
                "person_id": {
                    "type": "string",
                    "description": "Filter by credited person"
                },
                "published": {
                    "type": "boolean",
                    "description": "Only published (or only unpublished) episodes"
                }
            }
        }))
        .build(episode_list_handler)
}

async fn episode_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: EpisodeListParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    if params.series_id.is_none() && params.season_id.is_none() && params.person_id.is_none() {
        return Ok(ToolsCallResult::error(
            "one of series_id, season_id, or person_id is required",
        ));
    }

    let mut filters = Vec::new();
    if let Some(id) = params.series_id {
        filters.push(("series_id".to_string(), id));
    }
    if let Some(id) = params.season_id {
        filters.push(("season_id".to_string(), id));
    }
    if let Some(id) = params.person_id {
        filters.push(("person_id".to_string(), id));
    }
    if let Some(published) = params.published {
        filters.push(("published".to_string(), published.to_string()));
    }

    let items = match list_all(&ctx.cms, "/episodes", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let episodes: Vec<Episode> = decode_items(items)?;

    let result = json!({
        "episodes": episodes,
        "total": episodes.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// episode.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct EpisodeGetParams {
    #[serde(default)]
    id: Option<String>,
}

fn episode_get_tool() -> RegisteredTool {
    ToolBuilder::new("episode.get")
        .description("Get a single episode by id")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Episode id"
                }
            },
            "required": ["id"]
        }))
        .build(episode_get_handler)
}

async fn episode_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: EpisodeGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let page = match ctx.cms.get(&format!("/episodes/{}", id), &[]).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let episode: Episode = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "episode": episode }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// episode.create
// ============================================================================

#[derive(Debug, Deserialize)]
struct EpisodeCreateParams {
    #[serde(default)]
    series_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    season_id: Option<String>,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    description: Option<String>,
}

fn episode_create_tool() -> RegisteredTool {
    ToolBuilder::new("episode.create")
        .description("Create a draft episode in a series")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "series_id": {
                    "type": "string",
                    "description": "Series the episode belongs to"
                },
                "title": {
                    "type": "string",
                    "description": "Episode title"
                },
                "season_id": {
                    "type": "string",
                    "description": "Season the episode belongs to"
                },
                "number": {
                    "type": "integer",
                    "description": "Episode number within its season"
                },
                "description": {
                    "type": "string",
                    "description": "Episode description"
                }
            },
            "required": ["series_id", "title"]
        }))
        .build(episode_create_handler)
}

async fn episode_create_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: EpisodeCreateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let series_id = match params.series_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("series_id is required")),
    };
    let title = match params.title {
        Some(title) => title,
        None => return Ok(ToolsCallResult::error("title is required")),
    };

    let mut body = Map::new();
    body.insert("series_id".to_string(), json!(series_id));
    body.insert("title".to_string(), json!(title));
    if let Some(season_id) = params.season_id {
        body.insert("season_id".to_string(), json!(season_id));
    }
    if let Some(number) = params.number {
        body.insert("number".to_string(), json!(number));
    }
    if let Some(description) = params.description {
        body.insert("description".to_string(), json!(description));
    }

    let page = match ctx.cms.post("/episodes", Value::Object(body)).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let episode: Episode = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "episode": episode }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// episode.update
// ============================================================================

#[derive(Debug, Deserialize)]
struct EpisodeUpdateParams {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    season_id: Option<String>,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    published: Option<bool>,
}

fn episode_update_tool() -> RegisteredTool {
    ToolBuilder::new("episode.update")
        .description("Update fields of an episode, including publishing it")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Episode id"
                },
                "title": {
                    "type": "string"
                },
                "season_id": {
                    "type": "string"
                },
                "number": {
                    "type": "integer"
                },
                "description": {
                    "type": "string"
                },
                "published": {
                    "type": "boolean",
                    "description": "Publish or unpublish the episode"
                }
            },
            "required": ["id"]
        }))
        .build(episode_update_handler)
}

async fn episode_update_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: EpisodeUpdateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let mut body = Map::new();
    if let Some(title) = params.title {
        body.insert("title".to_string(), json!(title));
    }
    if let Some(season_id) = params.season_id {
        body.insert("season_id".to_string(), json!(season_id));
    }
    if let Some(number) = params.number {
        body.insert("number".to_string(), json!(number));
    }
    if let Some(description) = params.description {
        body.insert("description".to_string(), json!(description));
    }
    if let Some(published) = params.published {
        body.insert("published".to_string(), json!(published));
    }

    if body.is_empty() {
        return Ok(ToolsCallResult::error("at least one field to update is required"));
    }

    let page = match ctx
        .cms
        .patch(&format!("/episodes/{}", id), Value::Object(body))
        .await
    {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let episode: Episode = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "episode": episode }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// episode.delete
// ============================================================================

#[derive(Debug, Deserialize)]
struct EpisodeDeleteParams {
    #[serde(default)]
    id: Option<String>,
}

fn episode_delete_tool() -> RegisteredTool {
    ToolBuilder::new("episode.delete")
        .description("Delete an episode. This cannot be undone.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Episode id"
                }
            },
            "required": ["id"]
        }))
        .build(episode_delete_handler)
}

async fn episode_delete_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: EpisodeDeleteParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    if let Err(err) = ctx.cms.delete(&format!("/episodes/{}", id)).await {
        return Ok(cms_failure(err));
    }

    ToolsCallResult::json(&json!({ "deleted": true, "id": id }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}
