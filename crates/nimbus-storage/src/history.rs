//! Browsing history store
//!
//! Newest first, dedup by URL, capped to [`HISTORY_CAP`] entries.
//! Incognito filtering is the caller's concern; the store records
//! whatever it is handed.

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use crate::record::{read_records, write_records, PageRecord};
use crate::Result;

/// Most recent entries kept; older ones fall off on insert.
pub const HISTORY_CAP: usize = 100;

pub struct HistoryStore {
    path: PathBuf,
    entries: Arc<Mutex<Vec<PageRecord>>>,
}

impl HistoryStore {
    /// Open the store, loading any existing entries from disk.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_records(&path);

        tracing::debug!(path = %path.display(), count = entries.len(), "Loaded history");

        Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Record a visit. An existing entry for the same URL is replaced
    /// and the new entry goes to the front.
    pub fn record(&self, url: &str, title: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.retain(|e| e.url != url);
        entries.insert(0, PageRecord::new(url, title));
        entries.truncate(HISTORY_CAP);
        write_records(&self.path, &entries)
    }

    /// All entries, newest first.
    pub fn entries(&self) -> Vec<PageRecord> {
        self.entries.lock().clone()
    }

    /// Remove every entry for a URL, returning the remaining entries.
    pub fn delete_url(&self, url: &str) -> Result<Vec<PageRecord>> {
        let mut entries = self.entries.lock();
        entries.retain(|e| e.url != url);
        write_records(&self.path, &entries)?;
        Ok(entries.clone())
    }

    pub fn clear(&self) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.clear();
        write_records(&self.path, &entries)
    }
}

impl Clone for HistoryStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            entries: Arc::clone(&self.entries),
        }
    }
}
