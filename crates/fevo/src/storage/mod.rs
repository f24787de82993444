//! Storage backend for the server.
//!
//! The server persists the source list in a single pretty-printed JSON file.
//! [`FileStore`] implements [`fevo_core::storage::SourceStore`] so handlers
//! only ever see the trait object held in the application state.

pub mod file;

pub use file::FileStore;
