use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::DEMO_MODE_MESSAGE;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::Project;

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// POST /api/admin/verify - Check the admin code and return every project
///
/// Body: `{ "code": "..." }`. A wrong or missing code is 401 with no project data.
pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ProjectList> {
    let Json(payload) = payload?;
    let code = payload.get("code").and_then(Value::as_str).unwrap_or_default();

    if !state.gate.verify(code) {
        tracing::warn!("admin verify rejected");
        return Err(ApiError::unauthorized("Invalid admin code"));
    }

    let projects = state.store.get_all_projects().await?;
    tracing::info!(count = projects.len(), "admin listed projects");

    Ok(ApiResponse::success(ProjectList {
        projects,
        message: state.is_demo_mode().then_some(DEMO_MODE_MESSAGE),
    }))
}

/// DELETE /api/admin/projects/:id - Delete one project
///
/// Succeeds whether or not the id existed.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::bad_request("Project id is required"));
    }

    state.store.delete_project(id).await?;
    tracing::info!(id, "project deleted");

    Ok(ApiResponse::success(Message {
        message: "Project deleted successfully",
    }))
}

/// DELETE /api/admin/projects - Delete every project
pub async fn clear_projects(State(state): State<AppState>) -> ApiResult<Message> {
    state.store.clear_all_projects().await?;
    tracing::info!("all projects cleared");

    Ok(ApiResponse::success(Message {
        message: "All projects cleared successfully",
    }))
}
