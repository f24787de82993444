mod defaults;
mod error;
mod operations;
mod snippet;
mod types;

pub use defaults::default_sources;
pub use error::SourceError;
pub use operations::{
    add_source, ensure_unique_ids, move_source, new_source_id, remove_source, stamp_changed,
    update_source, validate_source,
};
pub use snippet::format_defaults_snippet;
pub use types::{JobSource, SourceChanges};
