//! Core types and pure operations for the fevo job source list.
//!
//! Everything here is free of I/O: the list model, list operations, the
//! store trait and its error taxonomy, and the admin write gate. Backends
//! and orchestration live in the `fevo` server and `fevo_client` crates.

pub mod auth;
pub mod serde;
pub mod sources;
pub mod storage;
