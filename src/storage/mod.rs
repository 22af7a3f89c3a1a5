pub mod error;
pub mod memory;
pub mod query_builder;
pub mod supabase;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::BackendConfig;
use crate::types::{InsertUser, Project, ProjectSubmission, User};

pub use error::StorageError;
pub use memory::MemStorage;
pub use query_builder::{SortDirection, TableQuery};
pub use supabase::SupabaseStorage;

/// Id no real row can carry; lets "delete everything" be expressed as a filter
pub const SENTINEL_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Persistence for project requests (and the unused user records)
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Short name reported by the status endpoint
    fn backend_name(&self) -> &'static str;

    /// Assign `id` and `createdAt`, persist, and return the stored record
    async fn insert_project(&self, submission: &ProjectSubmission) -> Result<Project, StorageError>;

    /// Every project, newest first
    async fn get_all_projects(&self) -> Result<Vec<Project>, StorageError>;

    /// Remove one project. Unknown ids are not an error.
    async fn delete_project(&self, id: &str) -> Result<(), StorageError>;

    async fn clear_all_projects(&self) -> Result<(), StorageError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;

    async fn create_user(&self, user: InsertUser) -> Result<User, StorageError>;
}

pub type SharedStore = Arc<dyn ProjectStore>;

/// Pick the store once at startup: the managed backend when credentials are
/// present, otherwise a process-local map.
pub fn from_config(config: &BackendConfig) -> Result<SharedStore, StorageError> {
    if config.is_configured() {
        let store = SupabaseStorage::new(config)?;
        tracing::info!(url = ?config.url, "Using managed backend storage");
        Ok(Arc::new(store))
    } else {
        tracing::warn!(
            "Backend credentials not found (SUPABASE_URL / SUPABASE_ANON_KEY); using in-memory storage"
        );
        Ok(Arc::new(MemStorage::new()))
    }
}
