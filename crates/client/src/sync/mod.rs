//! Mediates between admin actions and the stores.

mod engine;
mod error;
mod mirror;
mod mutation;

pub use engine::{LoadOrigin, MirrorOutcome, SourceSync};
pub use error::SyncError;
pub use mirror::MirrorHandle;
pub use mutation::{Change, Mutation};
