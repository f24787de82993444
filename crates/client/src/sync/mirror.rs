//! Background write of the full list to the primary backend.

use std::sync::Arc;

use tokio::task::JoinHandle;

use fevo_core::sources::JobSource;
use fevo_core::storage::{BackendKind, SourceStore, StoreError, WritePolicy};

/// Handle to a spawned mirror write.
///
/// The task owns its snapshot of the list, so later edits never race it.
/// Dropping the handle detaches the task; failures are still logged.
#[derive(Debug)]
pub struct MirrorHandle {
    kind: BackendKind,
    task: JoinHandle<Result<(), StoreError>>,
}

impl MirrorHandle {
    pub(crate) fn spawn(store: Arc<dyn SourceStore>, snapshot: Vec<JobSource>) -> Self {
        let kind = store.kind();
        let task = tokio::spawn(async move {
            let result = store.save(&snapshot).await;
            match &result {
                Ok(()) => {
                    tracing::debug!(backend = %kind, count = snapshot.len(), "Mirrored sources")
                }
                Err(e) => tracing::warn!(backend = %kind, error = %e, "Mirror write failed"),
            }
            result
        });

        Self { kind, task }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn policy(&self) -> WritePolicy {
        self.kind.write_policy()
    }

    /// Waits for the write and returns its outcome.
    pub async fn finish(self) -> Result<(), StoreError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(StoreError::PersistFailed(format!("mirror task failed: {e}"))),
        }
    }
}
