use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Any path no route matches
pub async fn not_found(method: Method, uri: Uri) -> Response {
    ApiError::not_found(format!("Endpoint not found: {} {}", method, uri.path())).into_response()
}

/// A known path called with a method it does not serve
pub async fn method_not_allowed(method: Method, uri: Uri) -> Response {
    ApiError::method_not_allowed(format!("Method {} not allowed on {}", method, uri.path()))
        .into_response()
}
