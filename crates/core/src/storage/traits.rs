use async_trait::async_trait;

use crate::sources::JobSource;

use super::{BackendKind, Result};

/// Reads and writes the full source list against one backend.
///
/// The list is the unit of persistence: there is no per-record API.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Which backend this store talks to.
    fn kind(&self) -> BackendKind;

    /// Fetches the current list.
    async fn load(&self) -> Result<Vec<JobSource>>;

    /// Persists the full list, replacing prior contents.
    async fn save(&self, sources: &[JobSource]) -> Result<()>;
}
