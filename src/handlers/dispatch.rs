use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{admin, projects, status};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EndpointQuery {
    pub endpoint: Option<String>,
}

fn unknown_endpoint(method: &str, endpoint: Option<&str>) -> Response {
    ApiError::not_found(format!(
        "Endpoint not found: {} /api?endpoint={}",
        method,
        endpoint.unwrap_or("")
    ))
    .into_response()
}

/// GET /api?endpoint=test
pub async fn get(State(state): State<AppState>, Query(query): Query<EndpointQuery>) -> Response {
    match query.endpoint.as_deref() {
        Some("test") => status::test(State(state)).await.into_response(),
        other => unknown_endpoint("GET", other),
    }
}

/// POST /api?endpoint=projects | POST /api?endpoint=admin
pub async fn post(
    State(state): State<AppState>,
    Query(query): Query<EndpointQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    match query.endpoint.as_deref() {
        Some("projects") => projects::submit(State(state), payload).await.into_response(),
        Some("admin") => admin::verify(State(state), payload).await.into_response(),
        other => unknown_endpoint("POST", other),
    }
}
