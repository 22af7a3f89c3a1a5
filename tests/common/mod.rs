#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use stackweb_api::config::{AppConfig, DEFAULT_ADMIN_CODE};
use stackweb_api::storage::{MemStorage, SharedStore};
use stackweb_api::AppState;

pub const ADMIN_CODE: &str = DEFAULT_ADMIN_CODE;

/// Router over a fresh in-memory store, plus a handle to that store
pub fn test_app() -> (Router, SharedStore) {
    let store: SharedStore = Arc::new(MemStorage::new());
    let state = AppState::new(store.clone(), AppConfig::development());
    (stackweb_api::app(state), store)
}

/// Drive one request through the router; non-JSON bodies come back as `Value::Null`
pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Ok((status, body))
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

pub fn delete(uri: &str, admin_code: Option<&str>) -> Request<Body> {
    let mut builder = Request::delete(uri);
    if let Some(code) = admin_code {
        builder = builder.header("x-admin-code", code);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn valid_submission() -> Value {
    json!({
        "websiteType": "startups",
        "projectName": "Demo",
        "projectDescription": "x",
        "communicationMethods": "gmail",
        "budget": "999",
        "domain": "own",
        "name": "A",
        "email": "a@b.com"
    })
}

/// Serve `app` on a free local port and return its base URL
pub async fn serve(app: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://127.0.0.1:{}", port))
}
