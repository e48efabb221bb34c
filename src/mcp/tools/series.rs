//! Series and Season Tools

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{cms_failure, decode_data, decode_items};
use crate::cms::models::{Season, Series};
use crate::cms::pagination::list_all;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register series and season tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(series_list_tool());
    registry.register_tool(series_get_tool());
    registry.register_tool(series_create_tool());
    registry.register_tool(series_update_tool());
    registry.register_tool(season_list_tool());
    registry.register_tool(season_get_tool());
    registry.register_tool(season_create_tool());
    registry.register_tool(season_update_tool());
}

// ============================================================================
// series.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct SeriesListParams {
    #[serde(default)]
    q: Option<String>,
}

fn series_list_tool() -> RegisteredTool {
    ToolBuilder::new("series.list")
        .description("List all series, optionally filtered by a title query")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "q": {
                    "type": "string",
                    "description": "Title filter"
                }
            }
        }))
        .build(series_list_handler)
}

async fn series_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SeriesListParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut filters = Vec::new();
    if let Some(q) = params.q {
        filters.push(("q".to_string(), q));
    }

    let items = match list_all(&ctx.cms, "/series", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let series: Vec<Series> = decode_items(items)?;

    let result = json!({
        "series": series,
        "total": series.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// series.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct SeriesGetParams {
    #[serde(default)]
    id: Option<String>,
}

fn series_get_tool() -> RegisteredTool {
    ToolBuilder::new("series.get")
        .description("Get a single series by id")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Series id"
                }
            },
            "required": ["id"]
        }))
        .build(series_get_handler)
}

async fn series_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SeriesGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let page = match ctx.cms.get(&format!("/series/{}", id), &[]).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let series: Series = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "series": series }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// series.create
// ============================================================================

#[derive(Debug, Deserialize)]
struct SeriesCreateParams {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    slug: Option<String>,
}

fn series_create_tool() -> RegisteredTool {
    ToolBuilder::new("series.create")
        .description("Create a new series")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Series title"
                },
                "description": {
                    "type": "string"
                },
                "slug": {
                    "type": "string",
                    "description": "URL slug; generated by the platform when omitted"
                }
            },
            "required": ["title"]
        }))
        .build(series_create_handler)
}

async fn series_create_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SeriesCreateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let title = match params.title {
        Some(title) => title,
        None => return Ok(ToolsCallResult::error("title is required")),
    };

    let mut body = Map::new();
    body.insert("title".to_string(), json!(title));
    if let Some(description) = params.description {
        body.insert("description".to_string(), json!(description));
    }
    if let Some(slug) = params.slug {
        body.insert("slug".to_string(), json!(slug));
    }

    let page = match ctx.cms.post("/series", Value::Object(body)).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let series: Series = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "series": series }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// series.update
// ============================================================================

#[derive(Debug, Deserialize)]
struct SeriesUpdateParams {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    slug: Option<String>,
}

fn series_update_tool() -> RegisteredTool {
    ToolBuilder::new("series.update")
        .description("Update fields of a series")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Series id"
                },
                "title": {
                    "type": "string"
                },
                "description": {
                    "type": "string"
                },
                "slug": {
                    "type": "string"
                }
            },
            "required": ["id"]
        }))
        .build(series_update_handler)
}

async fn series_update_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SeriesUpdateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let mut body = Map::new();
    if let Some(title) = params.title {
        body.insert("title".to_string(), json!(title));
    }
    if let Some(description) = params.description {
        body.insert("description".to_string(), json!(description));
    }
    if let Some(slug) = params.slug {
        body.insert("slug".to_string(), json!(slug));
    }

    if body.is_empty() {
        return Ok(ToolsCallResult::error("at least one field to update is required"));
    }

    let page = match ctx
        .cms
        .patch(&format!("/series/{}", id), Value::Object(body))
        .await
    {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let series: Series = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "series": series }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// season.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct SeasonListParams {
    #[serde(default)]
    series_id: Option<String>,
}

fn season_list_tool() -> RegisteredTool {
    ToolBuilder::new("season.list")
        .description("List the seasons of a series")
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
        .build(season_list_handler)
}

async fn season_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SeasonListParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let series_id = match params.series_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("series_id is required")),
    };

    let filters = vec![("series_id".to_string(), series_id)];
    let items = match list_all(&ctx.cms, "/seasons", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let seasons: Vec<Season> = decode_items(items)?;

    let result = json!({
        "seasons": seasons,
        "total": seasons.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// season.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct SeasonGetParams {
    #[serde(default)]
    id: Option<String>,
}

fn season_get_tool() -> RegisteredTool {
    ToolBuilder::new("season.get")
        .description("Get a single season by id")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Season id"
                }
            },
            "required": ["id"]
        }))
        .build(season_get_handler)
}

async fn season_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SeasonGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let page = match ctx.cms.get(&format!("/seasons/{}", id), &[]).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let season: Season = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "season": season }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// season.create
// ============================================================================

#[derive(Debug, Deserialize)]
struct SeasonCreateParams {
    #[serde(default)]
    series_id: Option<String>,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    title: Option<String>,
}

fn season_create_tool() -> RegisteredTool {
    ToolBuilder::new("season.create")
        .description("Create a season in a series")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "series_id": {
                    "type": "string",
                    "description": "Series the season belongs to"
                },
                "number": {
                    "type": "integer",
                    "description": "Season number"
                },
                "title": {
                    "type": "string"
                }
            },
            "required": ["series_id", "number"]
        }))
        .build(season_create_handler)
}

async fn season_create_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SeasonCreateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let series_id = match params.series_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("series_id is required")),
    };
    let number = match params.number {
        Some(number) => number,
        None => return Ok(ToolsCallResult::error("number is required")),
    };

    let mut body = Map::new();
    body.insert("series_id".to_string(), json!(series_id));
    body.insert("number".to_string(), json!(number));
    if let Some(title) = params.title {
        body.insert("title".to_string(), json!(title));
    }

    let page = match ctx.cms.post("/seasons", Value::Object(body)).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let season: Season = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "season": season }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// season.update
// ============================================================================

#[derive(Debug, Deserialize)]
struct SeasonUpdateParams {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    title: Option<String>,
}

fn season_update_tool() -> RegisteredTool {
    ToolBuilder::new("season.update")
        .description("Update fields of a season")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Season id"
                },
                "number": {
                    "type": "integer"
                },
                "title": {
                    "type": "string"
                }
            },
            "required": ["id"]
        }))
        .build(season_update_handler)
}

async fn season_update_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SeasonUpdateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let mut body = Map::new();
    if let Some(number) = params.number {
        body.insert("number".to_string(), json!(number));
    }
    if let Some(title) = params.title {
        body.insert("title".to_string(), json!(title));
    }

    if body.is_empty() {
        return Ok(ToolsCallResult::error("at least one field to update is required"));
    }

    let page = match ctx
        .cms
        .patch(&format!("/seasons/{}", id), Value::Object(body))
        .await
    {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let season: Season = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "season": season }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}
