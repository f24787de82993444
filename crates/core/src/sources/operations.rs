use std::collections::HashSet;

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use super::error::SourceError;
use super::types::{JobSource, SourceChanges};

/// Generates a fresh source id that is not used by any source in `existing`.
pub fn new_source_id(existing: &[JobSource]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !existing.iter().any(|source| source.id == id) {
            return id;
        }
    }
}

/// Validates a single source before it is added or saved.
pub fn validate_source(source: &JobSource) -> Result<(), SourceError> {
    if source.name.trim().is_empty() {
        return Err(SourceError::EmptyName);
    }
    validate_url(&source.url)
}

/// Checks that `url` parses as an absolute URL. Reachability is not checked.
fn validate_url(url: &str) -> Result<(), SourceError> {
    match Url::parse(url.trim()) {
        Ok(parsed) if !parsed.cannot_be_a_base() => Ok(()),
        _ => Err(SourceError::InvalidUrl(url.to_string())),
    }
}

/// Returns an error naming the first id that appears more than once.
pub fn ensure_unique_ids(sources: &[JobSource]) -> Result<(), SourceError> {
    let mut seen = HashSet::with_capacity(sources.len());
    for source in sources {
        if !seen.insert(source.id.as_str()) {
            return Err(SourceError::DuplicateId(source.id.clone()));
        }
    }
    Ok(())
}

/// Appends a new source with a freshly generated id.
pub fn add_source(
    sources: &mut Vec<JobSource>,
    name: &str,
    url: &str,
    now: DateTime<Utc>,
) -> Result<JobSource, SourceError> {
    let source = JobSource::new(new_source_id(sources), name.trim(), url.trim())
        .with_last_updated(now);
    validate_source(&source)?;

    sources.push(source.clone());
    Ok(source)
}

/// Applies field edits to the source with the given id.
///
/// `last_updated` is stamped only when a field value actually changes.
pub fn update_source<'a>(
    sources: &'a mut [JobSource],
    id: &str,
    changes: &SourceChanges,
    now: DateTime<Utc>,
) -> Result<&'a JobSource, SourceError> {
    let source = sources
        .iter_mut()
        .find(|source| source.id == id)
        .ok_or_else(|| SourceError::NotFound(id.to_string()))?;

    let mut candidate = source.clone();
    if let Some(name) = &changes.name {
        candidate.name = name.trim().to_string();
    }
    if let Some(url) = &changes.url {
        candidate.url = url.trim().to_string();
    }
    validate_source(&candidate)?;

    if candidate.name != source.name || candidate.url != source.url {
        candidate.last_updated = Some(now);
        *source = candidate;
    }

    Ok(&*source)
}

/// Removes the source with the given id, keeping the others in order.
pub fn remove_source(sources: &mut Vec<JobSource>, id: &str) -> Result<JobSource, SourceError> {
    let index = position_of(sources, id)?;
    Ok(sources.remove(index))
}

/// Moves the source with the given id to `to_index`. Only order changes.
pub fn move_source(sources: &mut Vec<JobSource>, id: &str, to_index: usize) -> Result<(), SourceError> {
    let from = position_of(sources, id)?;
    if to_index >= sources.len() {
        return Err(SourceError::PositionOutOfRange {
            position: to_index,
            len: sources.len(),
        });
    }

    let source = sources.remove(from);
    sources.insert(to_index, source);
    Ok(())
}

/// Stamps `last_updated` on every record of `edited` whose name or url
/// differs from the record with the same id in `current` (or that is new).
pub fn stamp_changed(current: &[JobSource], edited: &mut [JobSource], now: DateTime<Utc>) {
    for source in edited.iter_mut() {
        let changed = match current.iter().find(|old| old.id == source.id) {
            Some(old) => old.name != source.name || old.url != source.url,
            None => true,
        };
        if changed {
            source.last_updated = Some(now);
        }
    }
}

fn position_of(sources: &[JobSource], id: &str) -> Result<usize, SourceError> {
    sources
        .iter()
        .position(|source| source.id == id)
        .ok_or_else(|| SourceError::NotFound(id.to_string()))
}
