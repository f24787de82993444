use fevo_core::sources::{JobSource, SourceChanges};

/// A mutating admin action on the source list.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Add { name: String, url: String },
    Edit { id: String, changes: SourceChanges },
    Delete { id: String },
    /// Move to a 0-based position.
    Move { id: String, to_index: usize },
    /// Save a whole edited draft at once.
    Replace { sources: Vec<JobSource> },
}

/// What an applied mutation did.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Added(JobSource),
    Updated(JobSource),
    Removed(JobSource),
    Moved { id: String, to_index: usize },
    Replaced { count: usize },
}
