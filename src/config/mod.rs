use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Shared secret used when `ADMIN_CODE` is not set
pub const DEFAULT_ADMIN_CODE: &str = "freelancing.2025pjct";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub admin: AdminConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub max_request_size_bytes: usize,
}

/// Managed table backend. Both `url` and `anon_key` must be present to use it.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    #[serde(skip_serializing)]
    pub anon_key: Option<String>,
    #[serde(skip_serializing)]
    pub service_role_key: Option<String>,
    pub projects_table: String,
    pub users_table: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(skip_serializing)]
    pub code: String,
    /// False when `code` is the built-in fallback
    pub code_configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_allowed_headers: Vec<String>,
}

impl BackendConfig {
    pub fn is_configured(&self) -> bool {
        matches!((&self.url, &self.anon_key), (Some(u), Some(k)) if !u.is_empty() && !k.is_empty())
    }

    /// Key for deletes; the anon key when no service role key is set
    pub fn admin_key(&self) -> Option<&str> {
        self.service_role_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .or(self.anon_key.as_deref())
    }
}

// Keys stay out of debug output
impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field("service_role_key", &self.service_role_key.as_ref().map(|_| "<redacted>"))
            .field("projects_table", &self.projects_table)
            .field("users_table", &self.users_table)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("code", &"<redacted>")
            .field("code_configured", &self.code_configured)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("STACKWEB_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = v.parse().unwrap_or(self.server.max_request_size_bytes);
        }

        // Backend overrides
        self.backend.url = non_empty_var("SUPABASE_URL");
        self.backend.anon_key = non_empty_var("SUPABASE_ANON_KEY");
        self.backend.service_role_key = non_empty_var("SUPABASE_SERVICE_ROLE_KEY");
        if let Some(v) = non_empty_var("SUPABASE_PROJECTS_TABLE") {
            self.backend.projects_table = v;
        }
        if let Some(v) = non_empty_var("SUPABASE_USERS_TABLE") {
            self.backend.users_table = v;
        }
        if let Ok(v) = env::var("SUPABASE_TIMEOUT_SECS") {
            self.backend.timeout_secs = v.parse().unwrap_or(self.backend.timeout_secs);
        }

        // Admin overrides
        if let Some(code) = non_empty_var("ADMIN_CODE") {
            self.admin = AdminConfig {
                code,
                code_configured: true,
            };
        }

        // Security overrides
        if let Ok(v) = env::var("CORS_ALLOWED_HEADERS") {
            for header in v.split(',').map(|s| s.trim().to_ascii_lowercase()) {
                if !header.is_empty() && !self.security.cors_allowed_headers.contains(&header) {
                    self.security.cors_allowed_headers.push(header);
                }
            }
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 5000,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            backend: BackendConfig::unconfigured(30),
            admin: AdminConfig::fallback(),
            security: SecurityConfig::default_headers(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 5000,
                max_request_size_bytes: 256 * 1024,
            },
            backend: BackendConfig::unconfigured(15),
            admin: AdminConfig::fallback(),
            security: SecurityConfig::default_headers(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 5000,
                max_request_size_bytes: 64 * 1024,
            },
            backend: BackendConfig::unconfigured(10),
            admin: AdminConfig::fallback(),
            security: SecurityConfig::default_headers(),
        }
    }
}

impl BackendConfig {
    fn unconfigured(timeout_secs: u64) -> Self {
        Self {
            url: None,
            anon_key: None,
            service_role_key: None,
            projects_table: "projects".to_string(),
            users_table: "users".to_string(),
            timeout_secs,
        }
    }
}

impl AdminConfig {
    pub fn fallback() -> Self {
        Self {
            code: DEFAULT_ADMIN_CODE.to_string(),
            code_configured: false,
        }
    }
}

impl SecurityConfig {
    fn default_headers() -> Self {
        Self {
            cors_allowed_headers: vec!["content-type".to_string(), "x-admin-code".to_string()],
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 5000);
        assert!(!config.backend.is_configured());
        assert_eq!(config.admin.code, DEFAULT_ADMIN_CODE);
        assert!(!config.admin.code_configured);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.backend.timeout_secs, 10);
        assert!(config.server.max_request_size_bytes < AppConfig::development().server.max_request_size_bytes);
    }

    #[test]
    fn backend_needs_url_and_key() {
        let mut backend = BackendConfig::unconfigured(10);
        backend.url = Some("https://example.supabase.co".into());
        assert!(!backend.is_configured());
        backend.anon_key = Some("".into());
        assert!(!backend.is_configured());
        backend.anon_key = Some("anon".into());
        assert!(backend.is_configured());
    }

    #[test]
    fn admin_key_prefers_service_role() {
        let mut backend = BackendConfig::unconfigured(10);
        backend.anon_key = Some("anon".into());
        assert_eq!(backend.admin_key(), Some("anon"));
        backend.service_role_key = Some("service".into());
        assert_eq!(backend.admin_key(), Some("service"));
    }

    #[test]
    fn secrets_are_redacted() {
        let mut config = AppConfig::development();
        config.backend.anon_key = Some("anon-secret".into());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("anon-secret"));
        assert!(!debug.contains(DEFAULT_ADMIN_CODE));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("anon-secret"));
        assert!(!json.contains(DEFAULT_ADMIN_CODE));
    }
}
