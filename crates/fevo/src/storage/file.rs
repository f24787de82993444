//! Flat-file source list store.
//!
//! Writes go to a sibling temp file which is fsynced and then renamed over
//! the target, so a failed save never leaves a partially written list.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};

use fevo_core::sources::JobSource;
use fevo_core::storage::{BackendKind, Result, SourceStore, StoreError};

/// Content written to a freshly created list file.
const EMPTY_LIST: &str = "[]";

/// Stores the source list as a JSON array in one file.
pub struct FileStore {
    path: PathBuf,
    /// Serializes file creation and temp-file renames.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens the store, creating the file (and parent directories) with an
    /// empty list if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        store.ensure_exists().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_exists(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if fs::try_exists(&self.path)
            .await
            .map_err(|e| StoreError::BackendUnavailable(e.to_string()))?
        {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::BackendUnavailable(e.to_string()))?;
        }
        fs::write(&self.path, EMPTY_LIST)
            .await
            .map_err(|e| StoreError::BackendUnavailable(e.to_string()))?;

        tracing::info!(path = %self.path.display(), "Created empty source list file");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Writes `content` to the temp file and renames it over the list file.
    /// The temp file is removed if any step fails.
    async fn write_atomic(&self, content: &[u8]) -> std::io::Result<()> {
        let temp_path = self.temp_path();

        let result = write_then_rename(&temp_path, &self.path, content).await;
        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }
}

async fn write_then_rename(temp_path: &Path, path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await
}

#[async_trait]
impl SourceStore for FileStore {
    fn kind(&self) -> BackendKind {
        BackendKind::File
    }

    async fn load(&self) -> Result<Vec<JobSource>> {
        self.ensure_exists().await?;

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::BackendUnavailable(e.to_string()))?;

        let sources: Vec<JobSource> =
            serde_json::from_str(&content).map_err(|e| StoreError::Parse(e.to_string()))?;

        tracing::debug!(count = sources.len(), path = %self.path.display(), "Loaded sources");
        Ok(sources)
    }

    async fn save(&self, sources: &[JobSource]) -> Result<()> {
        let content = serde_json::to_string_pretty(sources)
            .map_err(|e| StoreError::PersistFailed(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        self.write_atomic(content.as_bytes())
            .await
            .map_err(|e| StoreError::PersistFailed(e.to_string()))?;

        tracing::info!(count = sources.len(), path = %self.path.display(), "Saved sources");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample() -> Vec<JobSource> {
        vec![
            JobSource::new("1", "LinkedIn", "https://linkedin.com"),
            JobSource::new("2", "רפאל (Rafael)", "https://career.rafael.co.il/students/")
                .with_last_updated(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()),
        ]
    }

    #[tokio::test]
    async fn test_open_creates_missing_file_with_empty_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("job-sources.json");

        let store = FileStore::open(&path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_recreates_deleted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job-sources.json");
        let store = FileStore::open(&path).await.unwrap();

        std::fs::remove_file(&path).unwrap();

        assert!(store.load().await.unwrap().is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("job-sources.json"))
            .await
            .unwrap();

        store.save(&sample()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_save_writes_pretty_json_without_empty_timestamps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job-sources.json");
        let store = FileStore::open(&path).await.unwrap();

        store
            .save(&[JobSource::new("1", "LinkedIn", "https://linkedin.com")])
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "[\n  {\n    \"id\": \"1\",\n    \"name\": \"LinkedIn\",\n    \"url\": \"https://linkedin.com\"\n  }\n]"
        );
    }

    #[tokio::test]
    async fn test_save_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("job-sources.json"))
            .await
            .unwrap();

        store.save(&sample()).await.unwrap();
        store.save(&sample()[..1]).await.unwrap();

        assert_eq!(store.load().await.unwrap(), sample()[..1].to_vec());
    }

    #[tokio::test]
    async fn test_load_legacy_numeric_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job-sources.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "LinkedIn", "url": "https://linkedin.com"}]"#,
        )
        .unwrap();
        let store = FileStore::open(&path).await.unwrap();

        let sources = store.load().await.unwrap();

        assert_eq!(sources, vec![JobSource::new("1", "LinkedIn", "https://linkedin.com")]);
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_parse_error_and_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job-sources.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileStore::open(&path).await.unwrap();

        let result = store.load().await;

        assert!(matches!(result, Err(StoreError::Parse(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[tokio::test]
    async fn test_failed_save_is_persist_failed_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job-sources.json");
        let store = FileStore::open(&path).await.unwrap();

        // Replace the list file with a non-empty directory so the rename fails.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let result = store.save(&sample()).await;

        assert!(matches!(result, Err(StoreError::PersistFailed(_))));
        assert!(path.is_dir());
        assert!(!store.temp_path().exists());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("job-sources.json");
        let store = FileStore::open(&path).await.unwrap();
        store.save(&sample()).await.unwrap();

        // Writes through this link fail with ENOSPC.
        std::os::unix::fs::symlink("/dev/full", store.temp_path()).unwrap();

        let result = store.save(&sample()[..1]).await;

        assert!(matches!(result, Err(StoreError::PersistFailed(_))));
        assert!(std::fs::symlink_metadata(store.temp_path()).is_err());
        assert_eq!(store.load().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_kind_is_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("job-sources.json"))
            .await
            .unwrap();
        assert_eq!(store.kind(), BackendKind::File);
    }
}
