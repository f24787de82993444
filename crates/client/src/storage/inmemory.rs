//! Device-local store kept entirely in memory.
//!
//! Behaves exactly like [`LocalStore`](super::LocalStore) (a single blob
//! under one key, corrupt content reads as empty) without touching the disk.

use async_trait::async_trait;
use tokio::sync::RwLock;

use fevo_core::sources::JobSource;
use fevo_core::storage::{BackendKind, Result, SourceStore};

use super::snapshot::{decode_snapshot, encode_snapshot};

/// In-memory snapshot store.
#[derive(Debug)]
pub struct InMemoryStore {
    kind: BackendKind,
    blob: RwLock<Option<String>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            kind: BackendKind::Local,
            blob: RwLock::new(None),
        }
    }

    /// Creates a store seeded with a raw blob, which may be corrupt.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            kind: BackendKind::Local,
            blob: RwLock::new(Some(blob.into())),
        }
    }

    /// Reports a different backend kind, so the store can stand in for a
    /// primary backend in tests.
    pub fn with_kind(mut self, kind: BackendKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the raw blob as last written.
    pub async fn snapshot(&self) -> Option<String> {
        self.blob.read().await.clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceStore for InMemoryStore {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn load(&self) -> Result<Vec<JobSource>> {
        let blob = self.blob.read().await;
        Ok(blob.as_deref().map(decode_snapshot).unwrap_or_default())
    }

    async fn save(&self, sources: &[JobSource]) -> Result<()> {
        let encoded = encode_snapshot(sources)?;
        *self.blob.write().await = Some(encoded);
        tracing::debug!(count = sources.len(), backend = %self.kind, "Saved in-memory snapshot");
        Ok(())
    }
}
