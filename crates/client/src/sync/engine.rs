//! The sync engine: one admin session over the source list.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use fevo_core::auth::AdminGate;
use fevo_core::sources::{
    add_source, default_sources, ensure_unique_ids, move_source, remove_source, stamp_changed,
    update_source, validate_source, JobSource,
};
use fevo_core::storage::{BackendKind, SourceStore, StoreError, WritePolicy};

use super::error::SyncError;
use super::mirror::MirrorHandle;
use super::mutation::{Change, Mutation};
use crate::storage::Backends;

/// Where the list shown at startup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Primary(BackendKind),
    Local,
    Defaults,
}

impl fmt::Display for LoadOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOrigin::Primary(kind) => write!(f, "{kind} backend"),
            LoadOrigin::Local => f.write_str("local snapshot"),
            LoadOrigin::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Owns the in-memory list for a session and keeps the stores in step with it.
///
/// Every mutation goes through the admin gate, is applied in memory, and is
/// persisted to the device-local store before returning. Writing to the
/// primary backend is a separate step, see [`SourceSync::mirror`] and
/// [`SourceSync::settle`].
pub struct SourceSync {
    local: Arc<dyn SourceStore>,
    primary: Option<Arc<dyn SourceStore>>,
    gate: AdminGate,
    sources: Vec<JobSource>,
    origin: LoadOrigin,
    /// List as it was before the last applied mutation, until the primary
    /// backend accepts it.
    undo: Option<Vec<JobSource>>,
}

/// How a mirror write ended when it did not fail the session.
#[derive(Debug, Clone, PartialEq)]
pub enum MirrorOutcome {
    Saved,
    /// A best-effort backend failed; the local snapshot stands.
    Skipped(StoreError),
}

impl SourceSync {
    /// Loads the startup list, falling back to the built-in defaults.
    pub async fn load(backends: Backends, gate: AdminGate) -> Self {
        Self::load_with_defaults(backends, gate, default_sources()).await
    }

    /// Loads the startup list: the primary backend if it has data, then the
    /// device-local snapshot, then `defaults`.
    pub async fn load_with_defaults(
        backends: Backends,
        gate: AdminGate,
        defaults: Vec<JobSource>,
    ) -> Self {
        let Backends { local, primary } = backends;
        let (sources, origin) = initial_list(local.as_ref(), primary.as_deref(), defaults).await;

        tracing::info!(count = sources.len(), origin = %origin, "Loaded source list");

        Self {
            local,
            primary,
            gate,
            sources,
            origin,
            undo: None,
        }
    }

    pub fn sources(&self) -> &[JobSource] {
        &self.sources
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    /// Unlocks the session for editing.
    pub fn unlock(&mut self, password: &str) -> Result<(), SyncError> {
        self.gate.unlock(password).map_err(|e| {
            tracing::warn!("Rejected admin password");
            SyncError::from(e)
        })
    }

    pub fn lock(&mut self) {
        self.gate.lock();
    }

    /// Applies `mutation` stamped with the current time.
    pub async fn apply(&mut self, mutation: Mutation) -> Result<Change, SyncError> {
        self.apply_at(mutation, Utc::now()).await
    }

    /// Applies `mutation` and persists the whole list to the local store.
    ///
    /// A rejected mutation (locked session, invalid input) leaves the list
    /// untouched. If only the local write fails, the in-memory list keeps
    /// the change and the error is returned.
    pub async fn apply_at(
        &mut self,
        mutation: Mutation,
        now: DateTime<Utc>,
    ) -> Result<Change, SyncError> {
        self.gate.require_unlocked()?;

        let before = self.sources.clone();
        let change = apply_mutation(&mut self.sources, mutation, now)?;
        self.undo = Some(before);

        self.local.save(&self.sources).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist local snapshot");
            SyncError::from(e)
        })?;

        tracing::info!(count = self.sources.len(), change = ?change, "Applied change");
        Ok(change)
    }

    /// Saves a whole edited draft in one step.
    pub async fn replace(&mut self, sources: Vec<JobSource>) -> Result<Change, SyncError> {
        self.apply(Mutation::Replace { sources }).await
    }

    /// Spawns a write of the current list to the primary backend.
    ///
    /// Returns `None` when no primary backend is configured.
    pub fn mirror(&self) -> Option<MirrorHandle> {
        self.primary
            .as_ref()
            .map(|store| MirrorHandle::spawn(Arc::clone(store), self.sources.clone()))
    }

    /// Waits for a mirror write and applies its outcome to the session.
    ///
    /// A primary backend that rejects the password rejects the change: the
    /// list and the local snapshot go back to their state before the last
    /// mutation and the session locks. Other failures are returned for
    /// authoritative backends and reported as [`MirrorOutcome::Skipped`] for
    /// best-effort ones.
    pub async fn settle(&mut self, handle: MirrorHandle) -> Result<MirrorOutcome, SyncError> {
        let kind = handle.kind();
        let policy = handle.policy();

        match handle.finish().await {
            Ok(()) => {
                self.undo = None;
                Ok(MirrorOutcome::Saved)
            }
            Err(StoreError::Unauthorized) => {
                tracing::warn!(backend = %kind, "Primary backend rejected the password");
                self.gate.lock();
                self.revert().await?;
                Err(SyncError::Store(StoreError::Unauthorized))
            }
            Err(e) => match policy {
                WritePolicy::Authoritative => Err(SyncError::Store(e)),
                WritePolicy::BestEffort => Ok(MirrorOutcome::Skipped(e)),
            },
        }
    }

    async fn revert(&mut self) -> Result<(), SyncError> {
        let Some(before) = self.undo.take() else {
            return Ok(());
        };
        self.sources = before;
        self.local.save(&self.sources).await?;
        tracing::info!(count = self.sources.len(), "Reverted rejected change");
        Ok(())
    }
}

async fn initial_list(
    local: &dyn SourceStore,
    primary: Option<&dyn SourceStore>,
    defaults: Vec<JobSource>,
) -> (Vec<JobSource>, LoadOrigin) {
    if let Some(primary) = primary {
        let kind = primary.kind();
        match primary.load().await {
            Ok(sources) if !sources.is_empty() => return (sources, LoadOrigin::Primary(kind)),
            Ok(_) => tracing::info!(backend = %kind, "Primary backend is empty"),
            Err(e) => {
                tracing::warn!(backend = %kind, error = %e, "Primary backend load failed")
            }
        }
    }

    match local.load().await {
        Ok(sources) if !sources.is_empty() => return (sources, LoadOrigin::Local),
        Ok(_) => tracing::debug!("No local snapshot"),
        Err(e) => tracing::warn!(error = %e, "Local snapshot load failed"),
    }

    (defaults, LoadOrigin::Defaults)
}

fn apply_mutation(
    sources: &mut Vec<JobSource>,
    mutation: Mutation,
    now: DateTime<Utc>,
) -> Result<Change, SyncError> {
    let change = match mutation {
        Mutation::Add { name, url } => Change::Added(add_source(sources, &name, &url, now)?),
        Mutation::Edit { id, changes } => {
            Change::Updated(update_source(sources, &id, &changes, now)?.clone())
        }
        Mutation::Delete { id } => Change::Removed(remove_source(sources, &id)?),
        Mutation::Move { id, to_index } => {
            move_source(sources, &id, to_index)?;
            Change::Moved { id, to_index }
        }
        Mutation::Replace { sources: mut draft } => {
            for source in &draft {
                validate_source(source)?;
            }
            ensure_unique_ids(&draft)?;
            stamp_changed(sources, &mut draft, now);
            *sources = draft;
            Change::Replaced {
                count: sources.len(),
            }
        }
    };
    Ok(change)
}
