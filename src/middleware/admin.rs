use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared admin code on mutating admin requests
pub const ADMIN_CODE_HEADER: &str = "x-admin-code";

/// Rejects the request with 401 unless `X-Admin-Code` matches the configured code
pub async fn require_admin_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let code = headers
        .get(ADMIN_CODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !state.gate.verify(code) {
        tracing::warn!(path = %request.uri().path(), "admin request rejected: bad or missing admin code");
        return ApiError::unauthorized("Invalid admin code").into_response();
    }

    next.run(request).await
}
