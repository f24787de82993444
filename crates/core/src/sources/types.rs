use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::deserialize_source_id;

/// A named external URL the directory page links out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSource {
    /// Opaque identifier, unique within a list. Legacy numeric ids are
    /// upcast to their decimal string on load.
    #[serde(deserialize_with = "deserialize_source_id")]
    pub id: String,
    pub name: String,
    pub url: String,
    /// Set whenever `name` or `url` is edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl JobSource {
    /// Creates a source with the given id, name and URL.
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            last_updated: None,
        }
    }

    /// Sets the last-updated timestamp.
    pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }
}

/// Field edits for a single source. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceChanges {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: None,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            name: None,
            url: Some(url.into()),
        }
    }

    /// Returns true if no field is being changed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none()
    }
}
