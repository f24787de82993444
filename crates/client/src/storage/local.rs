//! Device-local snapshot store.
//!
//! A tiny key/value store in a directory: each key is one `<key>.json` file.
//! Reads and writes are synchronous and a write replaces the file atomically
//! (temp file, fsync, rename).

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use fevo_core::sources::JobSource;
use fevo_core::storage::{BackendKind, Result, SourceStore, StoreError};

use super::snapshot::{decode_snapshot, encode_snapshot, SNAPSHOT_KEY};

/// Stores the last-saved list on this device.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding the snapshot key.
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(format!("{SNAPSHOT_KEY}.json"))
    }

    fn read_blob(&self) -> Option<String> {
        let path = self.snapshot_path();
        match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Failed to read local snapshot");
                None
            }
        }
    }
}

/// Writes `content` to `path` atomically.
///
/// If any step fails, the original file (if any) remains untouched and the
/// temp file is removed.
fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let result = write_then_rename(&temp_path, path, content);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_then_rename(temp_path: &Path, path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp_path, path)
}

#[async_trait]
impl SourceStore for LocalStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn load(&self) -> Result<Vec<JobSource>> {
        Ok(self
            .read_blob()
            .map(|raw| decode_snapshot(&raw))
            .unwrap_or_default())
    }

    async fn save(&self, sources: &[JobSource]) -> Result<()> {
        let blob = encode_snapshot(sources)?;
        let path = self.snapshot_path();

        atomic_write(&path, &blob).map_err(|e| StoreError::PersistFailed(e.to_string()))?;

        tracing::debug!(count = sources.len(), path = %path.display(), "Saved local snapshot");
        Ok(())
    }
}
