mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{post_json, send, test_app, valid_submission, ADMIN_CODE};
use stackweb_api::storage::ProjectStore;

#[tokio::test]
async fn submission_is_stored_and_listed_first() -> Result<()> {
    let (app, _store) = test_app();

    let mut older = valid_submission();
    older["projectName"] = json!("Older");
    let (status, _) = send(&app, post_json("/api/projects", &older)).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, post_json("/api/projects", &valid_submission())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let project = &body["project"];
    assert!(!project["id"].as_str().unwrap_or_default().is_empty());
    assert!(project["createdAt"].is_string());
    assert_eq!(project["websiteType"], "startups");
    assert_eq!(project["communicationMethods"], "gmail");
    assert_eq!(project["phone"], serde_json::Value::Null);
    assert_eq!(body["message"], "Development mode - Supabase not configured");

    let (status, list) = send(&app, post_json("/api/admin/verify", &json!({ "code": ADMIN_CODE }))).await?;
    assert_eq!(status, StatusCode::OK);
    let projects = list["projects"].as_array().cloned().unwrap_or_default();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["id"], project["id"]);
    assert_eq!(projects[1]["projectName"], "Older");
    Ok(())
}

#[tokio::test]
async fn invalid_email_is_rejected_without_write() -> Result<()> {
    let (app, store) = test_app();

    let mut payload = valid_submission();
    payload["email"] = json!("not-an-email");
    let (status, body) = send(&app, post_json("/api/projects", &payload)).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["fieldErrors"]["email"], "Invalid email address");
    assert!(store.get_all_projects().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_all_named() -> Result<()> {
    let (app, store) = test_app();

    let (status, body) = send(&app, post_json("/api/projects", &json!({ "websiteType": "gaming" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["projectName", "projectDescription", "communicationMethods", "budget", "domain", "name", "email"] {
        assert!(body["fieldErrors"].get(field).is_some(), "{} not reported", field);
    }
    assert!(store.get_all_projects().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn client_supplied_identity_is_ignored() -> Result<()> {
    let (app, store) = test_app();

    let mut payload = valid_submission();
    payload["id"] = json!("chosen-by-client");
    payload["createdAt"] = json!("2000-01-01T00:00:00Z");
    let (status, body) = send(&app, post_json("/api/projects", &payload)).await?;

    assert_eq!(status, StatusCode::OK);
    let id = body["project"]["id"].as_str().unwrap_or_default();
    assert!(!id.is_empty());
    assert_ne!(id, "chosen-by-client");
    assert_ne!(body["project"]["createdAt"], "2000-01-01T00:00:00Z");

    let stored = store.get_all_projects().await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    Ok(())
}

#[tokio::test]
async fn communication_methods_are_stored_canonically() -> Result<()> {
    let (app, store) = test_app();

    let mut payload = valid_submission();
    payload["communicationMethods"] = json!(" gmail ,, GMAIL ");
    let (status, body) = send(&app, post_json("/api/projects", &payload)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"]["communicationMethods"], "gmail");
    assert_eq!(store.get_all_projects().await?[0].communication_methods, "gmail");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_400() -> Result<()> {
    let (app, store) = test_app();

    let request = axum::http::Request::post("/api/projects")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"websiteType\": "))?;
    let (status, body) = send(&app, request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
    assert!(store.get_all_projects().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn design_selection_round_trips() -> Result<()> {
    let (app, _store) = test_app();

    let mut payload = valid_submission();
    payload["selectedDesignId"] = json!("d-3");
    payload["selectedDesignTitle"] = json!("Aurora");
    let (status, body) = send(&app, post_json("/api/projects", &payload)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["project"]["selectedDesignId"], "d-3");
    assert_eq!(body["project"]["selectedDesignTitle"], "Aurora");
    assert_eq!(body["project"]["selectedDesignCategory"], serde_json::Value::Null);
    Ok(())
}
