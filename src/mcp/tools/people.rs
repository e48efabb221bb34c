//! Person and Credit Tools

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{cms_failure, decode_data, decode_items};
use crate::cms::models::{Credit, Person};
use crate::cms::pagination::list_all;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register person and credit tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(person_list_tool());
    registry.register_tool(person_get_tool());
    registry.register_tool(person_create_tool());
    registry.register_tool(person_update_tool());
    registry.register_tool(credit_list_tool());
    registry.register_tool(credit_create_tool());
    registry.register_tool(credit_update_tool());
    registry.register_tool(credit_delete_tool());
}

// ============================================================================
// person.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct PersonListParams {
    #[serde(default)]
    q: Option<String>,
}

fn person_list_tool() -> RegisteredTool {
    ToolBuilder::new("person.list")
        .description("List people, optionally filtered by a name query")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "q": {
                    "type": "string",
                    "description": "Name filter"
                }
            }
        }))
        .build(person_list_handler)
}

async fn person_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: PersonListParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let mut filters = Vec::new();
    if let Some(q) = params.q {
        filters.push(("q".to_string(), q));
    }

    let items = match list_all(&ctx.cms, "/people", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let people: Vec<Person> = decode_items(items)?;

    let result = json!({
        "people": people,
        "total": people.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// person.get
// ============================================================================

#[derive(Debug, Deserialize)]
struct PersonGetParams {
    #[serde(default)]
    id: Option<String>,
}

fn person_get_tool() -> RegisteredTool {
    ToolBuilder::new("person.get")
        .description("Get a single person by id")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Person id"
                }
            },
            "required": ["id"]
        }))
        .build(person_get_handler)
}

async fn person_get_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: PersonGetParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let page = match ctx.cms.get(&format!("/people/{}", id), &[]).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let person: Person = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "person": person }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// person.create
// ============================================================================

#[derive(Debug, Deserialize)]
struct PersonCreateParams {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

fn person_create_tool() -> RegisteredTool {
    ToolBuilder::new("person.create")
        .description("Create a person record")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Full name"
                },
                "bio": {
                    "type": "string"
                },
                "email": {
                    "type": "string"
                }
            },
            "required": ["name"]
        }))
        .build(person_create_handler)
}

async fn person_create_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: PersonCreateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let name = match params.name {
        Some(name) => name,
        None => return Ok(ToolsCallResult::error("name is required")),
    };

    let mut body = Map::new();
    body.insert("name".to_string(), json!(name));
    if let Some(bio) = params.bio {
        body.insert("bio".to_string(), json!(bio));
    }
    if let Some(email) = params.email {
        body.insert("email".to_string(), json!(email));
    }

    let page = match ctx.cms.post("/people", Value::Object(body)).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let person: Person = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "person": person }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// person.update
// ============================================================================

#[derive(Debug, Deserialize)]
struct PersonUpdateParams {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

fn person_update_tool() -> RegisteredTool {
    ToolBuilder::new("person.update")
        .description("Update fields of a person record")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Person id"
                },
                "name": {
                    "type": "string"
                },
                "bio": {
                    "type": "string"
                },
                "email": {
                    "type": "string"
                }
            },
            "required": ["id"]
        }))
        .build(person_update_handler)
}

async fn person_update_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: PersonUpdateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    let mut body = Map::new();
    if let Some(name) = params.name {
        body.insert("name".to_string(), json!(name));
    }
    if let Some(bio) = params.bio {
        body.insert("bio".to_string(), json!(bio));
    }
    if let Some(email) = params.email {
        body.insert("email".to_string(), json!(email));
    }

    if body.is_empty() {
        return Ok(ToolsCallResult::error("at least one field to update is required"));
    }

    let page = match ctx
        .cms
        .patch(&format!("/people/{}", id), Value::Object(body))
        .await
    {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let person: Person = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "person": person }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// credit.list
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreditListParams {
    #[serde(default)]
    episode_id: Option<String>,
    #[serde(default)]
    series_id: Option<String>,
    #[serde(default)]
    person_id: Option<String>,
}

fn credit_list_tool() -> RegisteredTool {
    ToolBuilder::new("credit.list")
        .description("List credits of an episode, series, or person")
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
        .build(credit_list_handler)
}

async fn credit_list_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreditListParams =
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

    let items = match list_all(&ctx.cms, "/credits", &filters).await {
        Ok(items) => items,
        Err(err) => return Ok(cms_failure(err)),
    };
    let credits: Vec<Credit> = decode_items(items)?;

    let result = json!({
        "credits": credits,
        "total": credits.len(),
    });

    ToolsCallResult::json(&result).map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// credit.create
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreditCreateParams {
    #[serde(default)]
    person_id: Option<String>,
    #[serde(default)]
    episode_id: Option<String>,
    #[serde(default)]
    series_id: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

fn credit_create_tool() -> RegisteredTool {
    ToolBuilder::new("credit.create")
        .description("Credit a person on an episode or series")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "person_id": {
                    "type": "string",
                    "description": "Person to credit"
                },
                "episode_id": {
                    "type": "string",
                    "description": "Episode the credit applies to"
                },
                "series_id": {
                    "type": "string",
                    "description": "Series the credit applies to"
                },
                "role": {
                    "type": "string",
                    "description": "Role, e.g. host, guest, producer"
                }
            },
            "required": ["person_id", "role"]
        }))
        .build(credit_create_handler)
}

async fn credit_create_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreditCreateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let person_id = match params.person_id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("person_id is required")),
    };
    let role = match params.role {
        Some(role) => role,
        None => return Ok(ToolsCallResult::error("role is required")),
    };
    if params.episode_id.is_none() && params.series_id.is_none() {
        return Ok(ToolsCallResult::error(
            "one of episode_id or series_id is required",
        ));
    }

    let mut body = Map::new();
    body.insert("person_id".to_string(), json!(person_id));
    body.insert("role".to_string(), json!(role));
    if let Some(id) = params.episode_id {
        body.insert("episode_id".to_string(), json!(id));
    }
    if let Some(id) = params.series_id {
        body.insert("series_id".to_string(), json!(id));
    }

    let page = match ctx.cms.post("/credits", Value::Object(body)).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let credit: Credit = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "credit": credit }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// credit.update
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreditUpdateParams {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

fn credit_update_tool() -> RegisteredTool {
    ToolBuilder::new("credit.update")
        .description("Change the role of an existing credit")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Credit id"
                },
                "role": {
                    "type": "string"
                }
            },
            "required": ["id", "role"]
        }))
        .build(credit_update_handler)
}

async fn credit_update_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreditUpdateParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };
    let role = match params.role {
        Some(role) => role,
        None => return Ok(ToolsCallResult::error("role is required")),
    };

    let body = json!({ "role": role });
    let page = match ctx.cms.patch(&format!("/credits/{}", id), body).await {
        Ok(page) => page,
        Err(err) => return Ok(cms_failure(err)),
    };
    let credit: Credit = decode_data(&page)?;

    ToolsCallResult::json(&json!({ "credit": credit }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}

// ============================================================================
// credit.delete
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreditDeleteParams {
    #[serde(default)]
    id: Option<String>,
}

fn credit_delete_tool() -> RegisteredTool {
    ToolBuilder::new("credit.delete")
        .description("Remove a credit")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Credit id"
                }
            },
            "required": ["id"]
        }))
        .build(credit_delete_handler)
}

async fn credit_delete_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreditDeleteParams =
        serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let id = match params.id {
        Some(id) => id,
        None => return Ok(ToolsCallResult::error("id is required")),
    };

    if let Err(err) = ctx.cms.delete(&format!("/credits/{}", id)).await {
        return Ok(cms_failure(err));
    }

    ToolsCallResult::json(&json!({ "deleted": true, "id": id }))
        .map_err(|e| McpError::InternalError(e.to_string()))
}
