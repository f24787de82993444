use thiserror::Error;

/// Errors that can occur when validating or manipulating a source list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Source name cannot be empty")]
    EmptyName,
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),
    #[error("Source not found: {0}")]
    NotFound(String),
    #[error("Position {position} is out of range for a list of {len}")]
    PositionOutOfRange { position: usize, len: usize },
    #[error("Duplicate source id: {0}")]
    DuplicateId(String),
}
