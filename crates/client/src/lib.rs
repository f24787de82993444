//! fevo_client - source list sync engine and admin CLI.
//!
//! The stores in [`storage`] implement the three persistence backends seen
//! from an operator's device. [`sync::SourceSync`] decides which backend wins
//! at startup and pushes every edit to the local snapshot and the primary
//! backend.

pub mod cli;
pub mod config;
pub mod output;
pub mod storage;
pub mod sync;

pub use config::ClientConfig;
pub use sync::{LoadOrigin, Mutation, SourceSync, SyncError};
