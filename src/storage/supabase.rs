use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::query_builder::{SortDirection, TableQuery};
use super::{ProjectStore, StorageError, SENTINEL_ID};
use crate::api::mapper::{self, column_for, ProjectRow};
use crate::config::BackendConfig;
use crate::types::{InsertUser, Project, ProjectSubmission, User};

/// Store backed by a managed Postgres exposed through its REST table API.
///
/// Each operation is a single HTTP round trip. Failures are returned as-is;
/// nothing is retried.
pub struct SupabaseStorage {
    http: Client,
    rest_url: Url,
    anon_key: String,
    admin_key: String,
    projects_table: String,
    users_table: String,
}

/// Which key a request is sent with
#[derive(Debug, Clone, Copy)]
enum KeyRole {
    Anon,
    Admin,
}

impl SupabaseStorage {
    pub fn new(config: &BackendConfig) -> Result<Self, StorageError> {
        let base = config
            .url
            .as_deref()
            .ok_or(StorageError::ConfigMissing("SUPABASE_URL"))?;
        let anon_key = config
            .anon_key
            .clone()
            .ok_or(StorageError::ConfigMissing("SUPABASE_ANON_KEY"))?;
        let admin_key = config.admin_key().unwrap_or(&anon_key).to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        // Validate table names up front
        TableQuery::new(&config.projects_table)?;
        TableQuery::new(&config.users_table)?;

        Ok(Self {
            http,
            rest_url: Self::rest_url(base)?,
            anon_key,
            admin_key,
            projects_table: config.projects_table.clone(),
            users_table: config.users_table.clone(),
        })
    }

    /// `https://x.supabase.co` → `https://x.supabase.co/rest/v1/`
    fn rest_url(base: &str) -> Result<Url, StorageError> {
        let mut url = Url::parse(base).map_err(|e| StorageError::InvalidBackendUrl(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(StorageError::InvalidBackendUrl(base.to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.join("rest/v1/")
            .map_err(|e| StorageError::InvalidBackendUrl(e.to_string()))
    }

    fn request(&self, method: Method, query: &TableQuery, role: KeyRole) -> Result<RequestBuilder, StorageError> {
        let url = self
            .rest_url
            .join(query.table())
            .map_err(|e| StorageError::InvalidBackendUrl(e.to_string()))?;

        let key = match role {
            KeyRole::Anon => &self.anon_key,
            KeyRole::Admin => &self.admin_key,
        };

        Ok(self
            .http
            .request(method, url)
            .query(&query.to_query_pairs())
            .header("apikey", key)
            .header(header::AUTHORIZATION, format!("Bearer {}", key)))
    }

    /// Send and return the body, mapping non-2xx answers to `StorageError::Backend`
    async fn execute(&self, request: RequestBuilder) -> Result<String, StorageError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            let err = StorageError::from_backend_body(status.as_u16(), &body);
            tracing::error!(status = status.as_u16(), error = %err, "backend request failed");
            Err(err)
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StorageError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|e| StorageError::Decode(e.to_string()))
    }

    /// Insert one row and read back what the backend stored
    async fn insert_returning<B, T>(&self, table: &str, body: &B) -> Result<T, StorageError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = TableQuery::new(table)?.select(&["*"])?;
        let request = self
            .request(Method::POST, &query, KeyRole::Anon)?
            .header("Prefer", "return=representation")
            .json(&[body]);

        let mut rows: Vec<T> = self.fetch(request).await?;
        if rows.is_empty() {
            return Err(StorageError::Decode("insert returned no rows".to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    async fn delete_where(&self, query: TableQuery) -> Result<(), StorageError> {
        // Unfiltered deletes are refused by the backend; callers always filter
        if !query.has_filters() {
            return Err(StorageError::InvalidColumn("delete without filter".to_string()));
        }
        let request = self
            .request(Method::DELETE, &query, KeyRole::Admin)?
            .header("Prefer", "return=minimal");
        self.execute(request).await?;
        Ok(())
    }

    async fn select_one_user(&self, column: &str, value: &str) -> Result<Option<User>, StorageError> {
        let query = TableQuery::new(&self.users_table)?
            .select(&["*"])?
            .eq(column, value)?;
        let request = self.request(Method::GET, &query, KeyRole::Anon)?;
        let users: Vec<User> = self.fetch(request).await?;
        Ok(users.into_iter().next())
    }
}

fn created_at_column() -> &'static str {
    column_for("createdAt").unwrap_or("created_at")
}

fn id_column() -> &'static str {
    column_for("id").unwrap_or("id")
}

#[async_trait]
impl ProjectStore for SupabaseStorage {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }

    async fn insert_project(&self, submission: &ProjectSubmission) -> Result<Project, StorageError> {
        let row = mapper::to_row(submission);
        let stored: ProjectRow = self.insert_returning(&self.projects_table, &row).await?;
        tracing::info!(id = %stored.id, "project stored");
        Ok(mapper::from_row(stored))
    }

    async fn get_all_projects(&self) -> Result<Vec<Project>, StorageError> {
        let query = TableQuery::new(&self.projects_table)?
            .select(&["*"])?
            .order(created_at_column(), SortDirection::Desc)?;
        let request = self.request(Method::GET, &query, KeyRole::Anon)?;

        let rows: Vec<ProjectRow> = self.fetch(request).await?;
        Ok(rows.into_iter().map(mapper::from_row).collect())
    }

    async fn delete_project(&self, id: &str) -> Result<(), StorageError> {
        // No existence check: a delete matching zero rows still succeeds
        let query = TableQuery::new(&self.projects_table)?.eq(id_column(), id)?;
        self.delete_where(query).await
    }

    async fn clear_all_projects(&self) -> Result<(), StorageError> {
        let query = TableQuery::new(&self.projects_table)?.neq(id_column(), SENTINEL_ID)?;
        self.delete_where(query).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        self.select_one_user("id", id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        self.select_one_user("username", username).await
    }

    async fn create_user(&self, user: InsertUser) -> Result<User, StorageError> {
        self.insert_returning(&self.users_table, &user).await
    }
}
