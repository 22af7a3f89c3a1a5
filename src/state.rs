use std::sync::Arc;

use crate::auth::AdminGate;
use crate::config::AppConfig;
use crate::storage::{self, SharedStore, StorageError};

/// Everything a handler needs, built once in `main` and cloned per request
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub gate: AdminGate,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: SharedStore, config: AppConfig) -> Self {
        Self {
            store,
            gate: AdminGate::from_config(&config.admin),
            config: Arc::new(config),
        }
    }

    /// Select the store from the backend settings
    pub fn from_config(config: AppConfig) -> Result<Self, StorageError> {
        let store = storage::from_config(&config.backend)?;
        Ok(Self::new(store, config))
    }

    /// True when running on the process-local store
    pub fn is_demo_mode(&self) -> bool {
        self.store.backend_name() == "memory"
    }
}
