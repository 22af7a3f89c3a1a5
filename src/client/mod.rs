pub mod wizard;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::middleware::ADMIN_CODE_HEADER;
use crate::types::Project;

pub use wizard::{IntakeWizard, Step, StepError};

/// Address used when neither `--url` nor `STACKWEB_API_URL` is given
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `success: false`
    #[error("{message} (HTTP {status})")]
    Api {
        status: u16,
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Thin HTTP client over the intake and admin endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send, then unwrap the `{ success, ... }` envelope
    async fn call(
        &self,
        method: Method,
        segments: &[&str],
        admin_code: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let mut request = self.http.request(method, self.endpoint(segments)?);
        if let Some(code) = admin_code {
            request = request.header(ADMIN_CODE_HEADER, code);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text).map_err(|_| ClientError::Api {
            status: status.as_u16(),
            message: if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("empty response").to_string()
            } else {
                text.trim().to_string()
            },
            field_errors: BTreeMap::new(),
        })?;

        let success = value.get("success").and_then(Value::as_bool).unwrap_or(false);
        if !status.is_success() || !success {
            return Err(api_error(status, &value));
        }
        Ok(value)
    }

    /// POST /api/projects
    pub async fn submit_project(&self, payload: &Value) -> Result<Project, ClientError> {
        let value = self
            .call(Method::POST, &["api", "projects"], None, Some(payload))
            .await?;
        field(value, "project")
    }

    /// POST /api/admin/verify, returning the project list
    pub async fn verify_admin(&self, code: &str) -> Result<Vec<Project>, ClientError> {
        let value = self
            .call(
                Method::POST,
                &["api", "admin", "verify"],
                None,
                Some(&json!({ "code": code })),
            )
            .await?;
        field(value, "projects")
    }

    /// DELETE /api/admin/projects/:id
    pub async fn delete_project(&self, code: &str, id: &str) -> Result<String, ClientError> {
        let value = self
            .call(Method::DELETE, &["api", "admin", "projects", id], Some(code), None)
            .await?;
        field(value, "message")
    }

    /// DELETE /api/admin/projects
    pub async fn clear_projects(&self, code: &str) -> Result<String, ClientError> {
        let value = self
            .call(Method::DELETE, &["api", "admin", "projects"], Some(code), None)
            .await?;
        field(value, "message")
    }

    /// GET /api/test
    pub async fn status(&self) -> Result<Value, ClientError> {
        self.call(Method::GET, &["api", "test"], None, None).await
    }
}

fn api_error(status: StatusCode, body: &Value) -> ClientError {
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string();
    let field_errors = body
        .get("fieldErrors")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    ClientError::Api {
        status: status.as_u16(),
        message,
        field_errors,
    }
}

fn field<T: DeserializeOwned>(mut value: Value, key: &str) -> Result<T, ClientError> {
    let inner = value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ClientError::Decode(format!("response has no '{}'", key)))?;
    serde_json::from_value(inner).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_and_escapes_segments() {
        let client = ApiClient::new("http://localhost:5000").unwrap();
        let url = client.endpoint(&["api", "admin", "projects", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/admin/projects/a%20b%2Fc");

        let client = ApiClient::new("https://studio.example/base/").unwrap();
        let url = client.endpoint(&["api", "test"]).unwrap();
        assert_eq!(url.as_str(), "https://studio.example/base/api/test");
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(matches!(ApiClient::new("mailto:a@b.com"), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(ApiClient::new("nope"), Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn api_error_reads_envelope() {
        let body = json!({
            "success": false,
            "error": "Invalid project submission: email",
            "fieldErrors": { "email": "Invalid email address" }
        });
        match api_error(StatusCode::BAD_REQUEST, &body) {
            ClientError::Api { status, message, field_errors } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid project submission: email");
                assert_eq!(field_errors["email"], "Invalid email address");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
