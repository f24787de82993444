//! Persistence backends used by the sync engine.
//!
//! Every session has a device-local store and, depending on configuration, a
//! primary store the list is mirrored to.

pub mod file_api;
pub mod inmemory;
pub mod local;
pub mod remote;
pub mod snapshot;

use std::sync::Arc;

use fevo_core::storage::{BackendKind, SourceStore};

pub use file_api::FileApiStore;
pub use inmemory::InMemoryStore;
pub use local::LocalStore;
pub use remote::{RemoteCredentials, RemoteStore};

use crate::config::ClientConfig;

/// The stores a session works against.
#[derive(Clone)]
pub struct Backends {
    pub local: Arc<dyn SourceStore>,
    pub primary: Option<Arc<dyn SourceStore>>,
}

/// Builds the stores selected by `config`.
pub fn build_backends(config: &ClientConfig) -> Backends {
    let local: Arc<dyn SourceStore> = if config.ephemeral {
        Arc::new(InMemoryStore::new())
    } else {
        Arc::new(LocalStore::new(&config.data_dir))
    };

    let primary: Option<Arc<dyn SourceStore>> = match config.backend {
        BackendKind::Local => None,
        BackendKind::Remote => {
            let store = RemoteStore::new(config.remote.clone(), &config.remote_table);
            if !store.is_configured() {
                tracing::warn!("Remote backend selected without URL and key; using local data only");
            }
            Some(Arc::new(store))
        }
        BackendKind::File => Some(Arc::new(FileApiStore::new(
            &config.server_url,
            config.password.clone().unwrap_or_default(),
        ))),
    };

    tracing::debug!(
        backend = %config.backend,
        ephemeral = config.ephemeral,
        "Configured storage backends"
    );

    Backends { local, primary }
}
