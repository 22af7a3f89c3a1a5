use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProjectStore, StorageError};
use crate::api::mapper::{self, ProjectRow};
use crate::types::{InsertUser, Project, ProjectSubmission, User};

#[derive(Default)]
struct ProjectTable {
    rows: HashMap<String, ProjectRow>,
    last_created_at: Option<DateTime<Utc>>,
}

impl ProjectTable {
    /// Wall clock, bumped past the previous insert so ordering stays total
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let at = match self.last_created_at {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created_at = Some(at);
        at
    }
}

/// Process-local store used when no backend is configured.
/// Contents live as long as the process.
#[derive(Default)]
pub struct MemStorage {
    users: RwLock<HashMap<String, User>>,
    projects: RwLock<ProjectTable>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert_project(&self, submission: &ProjectSubmission) -> Result<Project, StorageError> {
        let mut table = self.projects.write().await;

        let id = Uuid::new_v4().to_string();
        let created_at = table.next_timestamp();
        let row = mapper::to_row(submission).into_row(id.clone(), created_at);

        table.rows.insert(id, row.clone());
        Ok(mapper::from_row(row))
    }

    async fn get_all_projects(&self) -> Result<Vec<Project>, StorageError> {
        let table = self.projects.read().await;

        let mut rows: Vec<ProjectRow> = table.rows.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        Ok(rows.into_iter().map(mapper::from_row).collect())
    }

    async fn delete_project(&self, id: &str) -> Result<(), StorageError> {
        let removed = self.projects.write().await.rows.remove(id);
        if removed.is_none() {
            tracing::debug!(id, "delete of unknown project ignored");
        }
        Ok(())
    }

    async fn clear_all_projects(&self) -> Result<(), StorageError> {
        let mut table = self.projects.write().await;
        table.rows.clear();
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, user: InsertUser) -> Result<User, StorageError> {
        let id = Uuid::new_v4().to_string();
        let user = User {
            id: id.clone(),
            username: user.username,
            password: user.password,
        };
        self.users.write().await.insert(id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DesignSelection, Domain};

    fn submission(name: &str) -> ProjectSubmission {
        ProjectSubmission {
            website_type: "startups".into(),
            project_name: name.into(),
            project_description: "x".into(),
            communication_methods: "gmail".into(),
            budget: "999".into(),
            domain: Domain::Own,
            name: "A".into(),
            email: "a@b.com".into(),
            phone: None,
            company: Some("Acme".into()),
            design: None,
        }
    }

    #[tokio::test]
    async fn insert_then_list_returns_same_fields() {
        let store = MemStorage::new();
        let mut input = submission("Demo");
        input.design = Some(DesignSelection {
            id: "d-2".into(),
            title: Some("Minimal".into()),
            category: None,
            image_url: Some("/img/minimal.png".into()),
        });

        let stored = store.insert_project(&input).await.unwrap();
        assert!(!stored.id.is_empty());

        let all = store.get_all_projects().await.unwrap();
        assert_eq!(all, vec![stored.clone()]);
        assert_eq!(all[0].project_name, "Demo");
        assert_eq!(all[0].company.as_deref(), Some("Acme"));
        assert_eq!(all[0].design(), input.design);
    }

    #[tokio::test]
    async fn ids_are_unique_and_order_is_newest_first() {
        let store = MemStorage::new();
        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(store.insert_project(&submission(&format!("p{}", i))).await.unwrap().id);
        }

        let all = store.get_all_projects().await.unwrap();
        assert_eq!(all.len(), 20);
        assert_eq!(all[0].project_name, "p19");
        assert_eq!(all[19].project_name, "p0");
        for pair in all.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }

        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = MemStorage::new();
        let a = store.insert_project(&submission("a")).await.unwrap();
        let b = store.insert_project(&submission("b")).await.unwrap();

        store.delete_project(&a.id).await.unwrap();
        let all = store.get_all_projects().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, b.id);

        // Unknown and repeated ids are fine
        store.delete_project(&a.id).await.unwrap();
        store.delete_project("missing").await.unwrap();
        assert_eq!(store.get_all_projects().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = MemStorage::new();
        store.insert_project(&submission("a")).await.unwrap();
        store.insert_project(&submission("b")).await.unwrap();

        store.clear_all_projects().await.unwrap();
        assert!(store.get_all_projects().await.unwrap().is_empty());

        // Clearing an empty store is a no-op
        store.clear_all_projects().await.unwrap();
    }

    #[tokio::test]
    async fn user_lookup() {
        let store = MemStorage::new();
        let user = store
            .create_user(InsertUser {
                username: "studio".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();

        assert_eq!(store.get_user(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.get_user_by_username("studio").await.unwrap(), Some(user));
        assert_eq!(store.get_user_by_username("nobody").await.unwrap(), None);
        assert_eq!(store.get_user("nope").await.unwrap(), None);
    }
}
