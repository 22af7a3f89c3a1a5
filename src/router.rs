use axum::{
    extract::DefaultBodyLimit,
    http::{header::HeaderName, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{admin, dispatch, fallback, projects, status};
use crate::middleware::require_admin_code;
use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.server.max_request_size_bytes;
    let cors = cors_layer(&state.config.security.cors_allowed_headers);

    Router::new()
        // Public
        .route("/", get(status::root).fallback(fallback::method_not_allowed))
        .route("/health", get(status::health).fallback(fallback::method_not_allowed))
        .merge(api_routes())
        .merge(admin_routes(&state))
        .fallback(fallback::not_found)
        .with_state(state)
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api",
            get(dispatch::get)
                .post(dispatch::post)
                .fallback(fallback::method_not_allowed),
        )
        .route("/api/test", get(status::test).fallback(fallback::method_not_allowed))
        .route(
            "/api/projects",
            post(projects::submit).fallback(fallback::method_not_allowed),
        )
        .route(
            "/api/admin/verify",
            post(admin::verify).fallback(fallback::method_not_allowed),
        )
}

/// Mutating admin routes; every request must carry the admin code header.
/// The gate runs after method matching so a wrong method is still 405.
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/projects",
            delete(admin::clear_projects)
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin_code))
                .fallback(fallback::method_not_allowed),
        )
        .route(
            "/api/admin/projects/:id",
            delete(admin::delete_project)
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin_code))
                .fallback(fallback::method_not_allowed),
        )
}

/// Any origin; OPTIONS is answered here with the allowed methods and headers
fn cors_layer(allowed_headers: &[String]) -> CorsLayer {
    let headers: Vec<HeaderName> = allowed_headers
        .iter()
        .filter_map(|h| HeaderName::from_bytes(h.as_bytes()).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(headers)
}
