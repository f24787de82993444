mod error;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use traits::SourceStore;
pub use types::{BackendKind, WritePolicy};
