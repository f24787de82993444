use thiserror::Error;

/// Errors that can occur while loading or saving a source list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Transport or configuration problem. Callers fall back to another backend.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
    /// The stored blob is not a JSON list of sources.
    #[error("Parse error: {0}")]
    Parse(String),
    /// The write was rejected or failed; prior content is unchanged.
    #[error("Persist failed: {0}")]
    PersistFailed(String),
    /// The shared admin password did not match.
    #[error("Unauthorized")]
    Unauthorized,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
