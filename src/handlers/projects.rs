use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use super::DEMO_MODE_MESSAGE;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::Project;
use crate::validation::validate_submission;

#[derive(Debug, Serialize)]
pub struct ProjectCreated {
    pub project: Project,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// POST /api/projects - Validate an intake submission and store it
///
/// Body: camelCase submission fields without `id` / `createdAt`.
/// Returns `{ success, project }`; 400 with `fieldErrors` when invalid,
/// 500 when the store fails. Nothing is written for an invalid body.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ProjectCreated> {
    let Json(payload) = payload?;

    let submission = validate_submission(&payload).map_err(|e| {
        tracing::debug!(fields = ?e.fields.keys().collect::<Vec<_>>(), "submission rejected");
        e
    })?;

    let project = state.store.insert_project(&submission).await?;
    tracing::info!(
        id = %project.id,
        website_type = %project.website_type,
        "project submission received"
    );

    Ok(ApiResponse::success(ProjectCreated {
        project,
        message: state.is_demo_mode().then_some(DEMO_MODE_MESSAGE),
    }))
}
