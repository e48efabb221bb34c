//! Stub Podhaven CMS
//!
//! A tiny axum app standing in for the real platform: fixed fixtures,
//! bracket-style page params, JSON:API-style error payloads, and the same
//! two-secret authorization header the adapter sends.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use super::constants::*;

#[derive(Clone)]
pub struct StubState {
    /// Number of GET /episodes requests served, for pagination assertions.
    pub episode_list_requests: Arc<AtomicUsize>,
}

pub fn make_cms_stub() -> (Router, StubState) {
    let state = StubState {
        episode_list_requests: Arc::new(AtomicUsize::new(0)),
    };

    let router = Router::new()
        .route("/episodes", get(list_episodes).post(create_episode))
        .route(
            "/episodes/{id}",
            get(get_episode).patch(update_episode).delete(delete_episode),
        )
        .route("/series", get(list_series).post(create_series))
        .route("/series/{id}", get(get_series))
        .route("/credits", get(list_credits))
        .route("/markers", post(create_marker))
        .route("/images", post(create_image))
        .with_state(state.clone());

    (router, state)
}

fn expected_auth_header() -> String {
    format!(
        "Token token=\"{}\", credential=\"{}\"",
        TEST_TOKEN, TEST_CREDENTIAL
    )
}

fn check_auth(headers: &HeaderMap) -> Result<(), Response> {
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if presented == expected_auth_header() {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "errors": [{ "code": "unauthorized", "title": "Unauthorized" }]
            })),
        )
            .into_response())
    }
}

fn not_found(resource: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "errors": [{
                "code": "not_found",
                "source": { "parameter": "id" },
                "detail": format!("{} {} was not found", resource, id)
            }]
        })),
    )
        .into_response()
}

fn episode_doc(id: &str, series_id: &str, number: usize) -> Value {
    json!({
        "id": id,
        "title": format!("Episode {}", number),
        "series_id": series_id,
        "number": number,
        "published": true,
        // Fields the adapter does not model, to exercise tolerance
        "internal_review_state": "approved"
    })
}

fn page_param(params: &HashMap<String, String>, name: &str) -> usize {
    params
        .get(name)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(1)
}

async fn list_episodes(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    state.episode_list_requests.fetch_add(1, Ordering::SeqCst);

    let page = page_param(&params, "page[number]");
    let size = params
        .get("page[size]")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(PAGE_SIZE);

    match params.get("series_id").map(String::as_str) {
        Some(SERIES_BIG) => {
            let start = (page - 1) * size;
            let end = (start + size).min(SERIES_BIG_EPISODES);
            let data: Vec<Value> = (start..end)
                .map(|i| episode_doc(&format!("ep_big_{}", i + 1), SERIES_BIG, i + 1))
                .collect();
            let mut body = json!({ "data": data });
            if end < SERIES_BIG_EPISODES {
                body["links"] = json!({ "next": format!("/episodes?page[number]={}", page + 1) });
            }
            Json(body).into_response()
        }
        Some(SERIES_INFINITE) => {
            let data: Vec<Value> = (0..size)
                .map(|i| {
                    episode_doc(
                        &format!("ep_inf_{}_{}", page, i + 1),
                        SERIES_INFINITE,
                        i + 1,
                    )
                })
                .collect();
            Json(json!({
                "data": data,
                "links": { "next": format!("/episodes?page[number]={}", page + 1) }
            }))
            .into_response()
        }
        Some(SERIES_ERR) => {
            if page >= 2 {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "errors": [{
                            "code": "server_error",
                            "detail": "episode index shard unavailable"
                        }]
                    })),
                )
                    .into_response()
            } else {
                let data: Vec<Value> = (0..size)
                    .map(|i| episode_doc(&format!("ep_err_{}", i + 1), SERIES_ERR, i + 1))
                    .collect();
                Json(json!({
                    "data": data,
                    "links": { "next": "/episodes?page[number]=2" }
                }))
                .into_response()
            }
        }
        Some(SERIES_GAP) => {
            let data: Vec<Value> = if page == 1 {
                (0..2)
                    .map(|i| episode_doc(&format!("ep_gap_{}", i + 1), SERIES_GAP, i + 1))
                    .collect()
            } else {
                Vec::new()
            };
            Json(json!({
                "data": data,
                "links": { "next": format!("/episodes?page[number]={}", page + 1) }
            }))
            .into_response()
        }
        Some(SERIES_SMALL) => {
            if page > 1 {
                return Json(json!({ "data": [] })).into_response();
            }
            let data: Vec<Value> = (0..3)
                .map(|i| episode_doc(&format!("ep_small_{}", i + 1), SERIES_SMALL, i + 1))
                .collect();
            Json(json!({ "data": data })).into_response()
        }
        Some(_) => Json(json!({ "data": [] })).into_response(),
        None => {
            if params.contains_key("season_id") || params.contains_key("person_id") {
                let data = vec![
                    episode_doc("ep_f_1", SERIES_SMALL, 1),
                    episode_doc("ep_f_2", SERIES_SMALL, 2),
                ];
                Json(json!({ "data": data })).into_response()
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "errors": [{
                            "code": "missing_filter",
                            "source": { "parameter": "series_id" },
                            "detail": "a series, season, or person filter is required"
                        }]
                    })),
                )
                    .into_response()
            }
        }
    }
}

async fn get_episode(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    if id == EPISODE_1_ID {
        Json(json!({ "data": episode_doc(EPISODE_1_ID, SERIES_SMALL, 1) })).into_response()
    } else {
        not_found("Episode", &id)
    }
}

async fn create_episode(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    if body.get("title").and_then(Value::as_str).unwrap_or("").is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "errors": [{
                    "code": "blank",
                    "source": { "parameter": "title" },
                    "detail": "Title can't be blank"
                }]
            })),
        )
            .into_response();
    }

    let mut data = body;
    data["id"] = json!("ep_new");
    (StatusCode::CREATED, Json(json!({ "data": data }))).into_response()
}

async fn update_episode(
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    if id != EPISODE_1_ID {
        return not_found("Episode", &id);
    }
    let mut data = episode_doc(EPISODE_1_ID, SERIES_SMALL, 1);
    if let (Some(data_map), Some(body_map)) = (data.as_object_mut(), body.as_object()) {
        for (key, value) in body_map {
            data_map.insert(key.clone(), value.clone());
        }
    }
    Json(json!({ "data": data })).into_response()
}

async fn delete_episode(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    if id != EPISODE_1_ID {
        return not_found("Episode", &id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_series(
    headers: HeaderMap,
    Query(_params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    Json(json!({
        "data": [
            { "id": SERIES_1_ID, "title": "Morning Static", "slug": "morning-static" },
            { "id": "ser_2", "title": "Field Notes", "slug": "field-notes" }
        ]
    }))
    .into_response()
}

async fn get_series(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    if id == SERIES_1_ID {
        Json(json!({
            "data": { "id": SERIES_1_ID, "title": "Morning Static", "episodes_count": 3 }
        }))
        .into_response()
    } else {
        not_found("Series", &id)
    }
}

async fn create_series(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    let mut data = body;
    data["id"] = json!("ser_new");
    (StatusCode::CREATED, Json(json!({ "data": data }))).into_response()
}

async fn list_credits(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    let episode_id = params.get("episode_id").cloned();
    Json(json!({
        "data": [{
            "id": "cr_1",
            "person_id": "per_1",
            "episode_id": episode_id,
            "role": "host"
        }]
    }))
    .into_response()
}

async fn create_marker(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    let mut data = body;
    data["id"] = json!("mk_new");
    (StatusCode::CREATED, Json(json!({ "data": data }))).into_response()
}

async fn create_image(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(response) = check_auth(&headers) {
        return response;
    }
    let mut data = body;
    data["id"] = json!("img_new");
    (StatusCode::CREATED, Json(json!({ "data": data }))).into_response()
}
