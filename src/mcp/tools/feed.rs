//! Feed Item and Image Tools

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{cms_failure, decode_data, decode_items};
use crate::cms::aliases::resolve_image_purpose;
use crate::cms::models::{FeedItem, Image};
use crate::cms::pagination::list_all;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register feed item and image tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(feed_item_list_tool());
    registry.register_tool(feed_item_get_tool());
    registry.register_tool(image_list_tool());
    registry.register_tool(image_create_tool());
    registry.register_tool(image_delete_tool());
}

// ============================================================================
// feed_item.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeedItemListParams {
    #[serde(default)]
    series_id: Option<String>,
}

fn feed_item_list_tool() -> RegisteredTool {
    ToolBuilder::new("feed_item.list")
        .description("List the published feed items of a series")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "series_id": {
                    "type": "string",
                    "description": "Series id"
                }
            },
            "required": ["series_id"]
        }))
        .build(feed_item_list_handler)
}

async fn feed_item_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: FeedItemListParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let series_id = match params.series_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("series_id is required")),
    };

    let filters = vec![("series_id".to_string(), series_id)];
    let items = match list_all(&ctx.cms, "/feed_items", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let feed_items: Vec<FeedItem> = decode_items(items)?;

    let result = json!({
        "feed_items": feed_items,
        "total": feed_items.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// feed_item.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeedItemGetParams {
    #[serde(default)]
    id: Option<String>,
}

fn feed_item_get_tool() -> RegisteredTool {
    ToolBuilder::new("feed_item.get")
        .description("Get a single feed item by id")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Feed item id"
                }
            },
            "required": ["id"]
        }))
        .build(feed_item_get_handler)
}

async fn feed_item_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: FeedItemGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let page = match ctx.cms.get(&format!("/feed_items/{}", id), &[]).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let feed_item: FeedItem = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "feed_item": feed_item }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// image.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct ImageListParams {
    #[serde(default)]
    episode_id: Option<String>,
    #[serde(default)]
    series_id: Option<String>,
    #[serde(default)]
    person_id: Option<String>,
}

fn image_list_tool() -> RegisteredTool {
    ToolBuilder::new("image.list")
        .description("List the images attached to an episode, series, or person")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "episode_id": {
                    "type": "string",
                    "description": "Filter by episode"
                },
                "series_id": {
                    "type": "string",
                    "description": "Filter by series"
                },
                "person_id": {
                    "type": "string",
                    "description": "Filter by person"
                }
            }
        }))
        .build(image_list_handler)
}

async fn image_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ImageListParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    if params.episode_id.is_none() && params.series_id.is_none() && params.person_id.is_none() {
        return Ok(ToolsCallResult::error(
            "one of episode_id, series_id, or person_id is required",
        ));
    }

    let mut filters = Vec::new();
    if let Some(id) = params.episode_id {
        filters.push(("episode_id".to_string(), id));
    }
    if let Some(id) = params.series_id {
        filters.push(("series_id".to_string(), id));
    }
    if let Some(id) = params.person_id {
        filters.push(("person_id".to_string(), id));
    }

    let items = match list_all(&ctx.cms, "/images", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let images: Vec<Image> = decode_items(items)?;

    let result = json!({
        "images": images,
        "total": images.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// image.create
// ============================================================================

#[derive(Debug, Deserialize)]
struct ImageCreateParams {
    #[serde(default)]
    episode_id: Option<String>,
    #[serde(default)]
    series_id: Option<String>,
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default)]
    purpose: Option<String>,
    #[serde(default)]
    source_url: Option<String>,
}

fn image_create_tool() -> RegisteredTool {
    ToolBuilder::new("image.create")
        .description(
            "Attach an image to an episode, series, or person from a source \
             URL. Purpose accepts cover/thumb/banner shorthands.",
        )
        .input_schema(json!({
            "type": "object",
            "properties": {
                "episode_id": {
                    "type": "string",
                    "description": "Owning episode"
                },
                "series_id": {
                    "type": "string",
                    "description": "Owning series"
                },
                "person_id": {
                    "type": "string",
                    "description": "Owning person"
                },
                "purpose": {
                    "type": "string",
                    "description": "Image purpose: cover_art, thumbnail, banner_art (or cover/thumb/banner)"
                },
                "source_url": {
                    "type": "string",
                    "description": "URL the platform ingests the image from"
                }
            },
            "required": ["purpose", "source_url"]
        }))
        .build(image_create_handler)
}

async fn image_create_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ImageCreateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    if params.episode_id.is_none() && params.series_id.is_none() && params.person_id.is_none() {
        return Ok(ToolsCallResult::error(
            "one of episode_id, series_id, or person_id is required",
        ));
    }
    let purpose = match params.purpose {
        Some(purpose) => resolve_image_purpose(&purpose),
        None => return Ok(ToolsCallResult::error("purpose is required")),
    };
    let source_url = match params.source_url {
        Some(url) => url,
        None => return Ok(ToolsCallResult::error("source_url is required")),
    };

    let mut body = Map::new();
    body.insert("purpose".to_string(), json!(purpose));
    body.insert("source_url".to_string(), json!(source_url));
    if let Some(id) = params.episode_id {
        body.insert("episode_id".to_string(), json!(id));
    }
    if let Some(id) = params.series_id {
        body.insert("series_id".to_string(), json!(id));
    }
    if let Some(id) = params.person_id {
        body.insert("person_id".to_string(), json!(id));
    }

    let page = match ctx.cms.post("/images", Value::Object(body)).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let image: Image = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "image": image }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// image.delete
// ============================================================================

#[derive(Debug, Deserialize)]
struct ImageDeleteParams {
    #[serde(default)]
    id: Option<String>,
}

fn image_delete_tool() -> RegisteredTool {
    ToolBuilder::new("image.delete")
        .description("Remove an image")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Image id"
                }
            },
            "required": ["id"]
        }))
        .build(image_delete_handler)
}

async fn image_delete_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ImageDeleteParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    if let Err(err) = ctx.cms.delete(&format!("/images/{}", id)).await {
        return Ok(cms_failure(err));
    }

    ToolsCallResult::json(&json!({ "deleted": true, "id": id }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}
