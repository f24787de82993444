//! Encoding of the device-local snapshot blob.
//!
//! The blob is the compact JSON array stored under a single key. Reading a
//! blob never fails: anything unparseable is logged and treated as "no data
//! yet".

use fevo_core::sources::JobSource;
use fevo_core::storage::{Result, StoreError};

/// Key under which the snapshot is stored.
pub const SNAPSHOT_KEY: &str = "jobSources";

/// Serializes a list into a snapshot blob.
pub fn encode_snapshot(sources: &[JobSource]) -> Result<String> {
    serde_json::to_string(sources).map_err(|e| StoreError::PersistFailed(e.to_string()))
}

/// Parses a snapshot blob, returning an empty list for corrupt content.
pub fn decode_snapshot(raw: &str) -> Vec<JobSource> {
    match serde_json::from_str::<Vec<JobSource>>(raw) {
        Ok(sources) => sources,
        Err(e) => {
            let error = StoreError::Parse(e.to_string());
            tracing::warn!(%error, key = SNAPSHOT_KEY, "Ignoring corrupt local snapshot");
            Vec::new()
        }
    }
}
