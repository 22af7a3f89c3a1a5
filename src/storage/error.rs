use thiserror::Error;

/// Errors from a project store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid backend URL: {0}")]
    InvalidBackendUrl(String),

    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    /// The backend answered with an error body
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected backend response: {0}")]
    Decode(String),

    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

impl StorageError {
    /// Build from a PostgREST error body (`{"message": ..., "details": ..., "hint": ...}`)
    pub fn from_backend_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                let message = v.get("message")?.as_str()?.to_string();
                match v.get("details").and_then(|d| d.as_str()) {
                    Some(details) if !details.is_empty() => {
                        Some(format!("{} ({})", message, details))
                    }
                    _ => Some(message),
                }
            })
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("backend returned HTTP {}", status)
                } else {
                    body.trim().to_string()
                }
            });

        StorageError::Backend { status, message }
    }
}
