//! Persisted record shape shared by history and bookmarks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Result;

/// One visited or bookmarked page. Uniqueness is by `url` within each
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Read a record file. A missing file is an empty collection, and a
/// corrupt file is treated the same way rather than failing the caller.
pub(crate) fn read_records(path: &Path) -> Vec<PageRecord> {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to parse record file");
                Vec::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read record file");
            Vec::new()
        }
    }
}

pub(crate) fn write_records(path: &Path, records: &[PageRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let serialized = serde_json::to_string_pretty(records)?;
    fs::write(path, serialized)?;
    Ok(())
}
