//! Shared application state.
//!
//! Built once at startup and cloned into every handler. Read-only after
//! construction: the admin password never changes during the process.

use std::sync::Arc;

use fevo_core::auth::password_matches;
use fevo_core::storage::SourceStore;

use crate::{config::Config, storage::FileStore};

#[derive(Clone)]
pub struct AppState {
    /// Store holding the source list.
    pub store: Arc<dyn SourceStore>,
    /// Shared admin password required for writes.
    admin_password: Arc<str>,
}

impl AppState {
    /// Creates state from an existing store and the shared password.
    pub fn new(store: Arc<dyn SourceStore>, admin_password: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            admin_password: admin_password.into(),
        }
    }

    /// Opens the list file named in `config`, creating it if missing.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.data_file).await?;
        tracing::info!(path = %store.path().display(), "Using source list file");

        Ok(Self::new(Arc::new(store), config.admin_password.as_str()))
    }

    /// Returns true if `offered` is the shared admin password.
    pub fn password_matches(&self, offered: &str) -> bool {
        password_matches(offered, &self.admin_password)
    }
}
