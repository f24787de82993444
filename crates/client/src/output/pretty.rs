//! Pretty output formatting.

use fevo_core::sources::JobSource;

use crate::sync::{Change, LoadOrigin};

/// Format a source for display.
pub fn format_source(source: &JobSource) -> String {
    let mut output = format!("{}\n  ID: {}\n  URL: {}", source.name, source.id, source.url);
    if let Some(at) = source.last_updated {
        output.push_str(&format!("\n  Updated: {}", at.format("%Y-%m-%d %H:%M UTC")));
    }
    output
}

/// Format the list with a header naming where it came from.
pub fn format_sources(sources: &[JobSource], origin: LoadOrigin) -> String {
    if sources.is_empty() {
        return format!("No sources found ({origin}).");
    }
    let mut output = format!("SOURCES ({}, from {origin})\n", sources.len());
    output.push_str(&"-".repeat(40));
    for (position, source) in sources.iter().enumerate() {
        output.push_str(&format!("\n[{position}] {}", format_source(source)));
        output.push('\n');
    }
    output
}

/// Format the result of a mutation.
pub fn format_change(change: &Change) -> String {
    match change {
        Change::Added(source) => format!("Added:\n{}", format_source(source)),
        Change::Updated(source) => format!("Updated:\n{}", format_source(source)),
        Change::Removed(source) => format!("Deleted {} ({})", source.name, source.id),
        Change::Moved { id, to_index } => format!("Moved {id} to position {to_index}"),
        Change::Replaced { count } => format!("Saved {count} sources"),
    }
}
