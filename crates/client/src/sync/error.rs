use thiserror::Error;

use fevo_core::auth::GateError;
use fevo_core::sources::SourceError;
use fevo_core::storage::StoreError;

/// Errors returned by [`SourceSync`](super::SourceSync).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyncError {
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
