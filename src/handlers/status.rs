use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentReport {
    pub supabase_url: &'static str,
    pub supabase_key: &'static str,
    pub admin_code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub storage: &'static str,
    pub environment: EnvironmentReport,
}

fn presence(present: bool) -> &'static str {
    if present {
        "Present"
    } else {
        "Missing"
    }
}

/// GET /api/test - Report that the API is up and which settings are present
///
/// Only presence is reported; no configured value is ever echoed.
pub async fn test(State(state): State<AppState>) -> ApiResult<StatusReport> {
    let config = &state.config;

    Ok(ApiResponse::success(StatusReport {
        message: "API is working!",
        timestamp: Utc::now(),
        storage: state.store.backend_name(),
        environment: EnvironmentReport {
            supabase_url: presence(config.backend.url.is_some()),
            supabase_key: presence(config.backend.anon_key.is_some()),
            admin_code: presence(config.admin.code_configured),
        },
    }))
}

/// GET /health - Liveness
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "storage": state.store.backend_name(),
    })))
}

/// GET / - Service descriptor
pub async fn root() -> ApiResult<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Ok(ApiResponse::success(json!({
        "name": "StackWeb API",
        "version": version,
        "endpoints": {
            "submit": "POST /api/projects",
            "admin_verify": "POST /api/admin/verify",
            "admin_delete": "DELETE /api/admin/projects/:id (X-Admin-Code)",
            "admin_clear": "DELETE /api/admin/projects (X-Admin-Code)",
            "status": "GET /api/test",
            "dispatch": "/api?endpoint=projects|admin|test",
            "health": "GET /health",
        }
    })))
}
