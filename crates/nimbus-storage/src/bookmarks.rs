//! Bookmark store
//!
//! Insertion order, dedup by URL, no cap.

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use crate::record::{read_records, write_records, PageRecord};
use crate::Result;

pub struct BookmarkStore {
    path: PathBuf,
    entries: Arc<Mutex<Vec<PageRecord>>>,
}

impl BookmarkStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_records(&path);

        tracing::debug!(path = %path.display(), count = entries.len(), "Loaded bookmarks");

        Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Add a bookmark. Returns false when the URL is already present.
    pub fn add(&self, url: &str, title: &str) -> Result<bool> {
        let mut entries = self.entries.lock();
        if entries.iter().any(|e| e.url == url) {
            return Ok(false);
        }
        entries.push(PageRecord::new(url, title));
        write_records(&self.path, &entries)?;
        Ok(true)
    }

    pub fn remove(&self, url: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.retain(|e| e.url != url);
        write_records(&self.path, &entries)
    }

    /// Rewrite an existing bookmark in place. Returns false when
    /// `old_url` is not bookmarked.
    pub fn update(&self, old_url: &str, new_url: &str, new_title: &str) -> Result<bool> {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.iter_mut().find(|e| e.url == old_url) else {
            return Ok(false);
        };
        *entry = PageRecord::new(new_url, new_title);
        write_records(&self.path, &entries)?;
        Ok(true)
    }

    pub fn is_bookmarked(&self, url: &str) -> bool {
        self.entries.lock().iter().any(|e| e.url == url)
    }

    pub fn list(&self) -> Vec<PageRecord> {
        self.entries.lock().clone()
    }
}

impl Clone for BookmarkStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            entries: Arc::clone(&self.entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, BookmarkStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::open(dir.path().join("bookmarks.json"));
        (dir, store)
    }

    #[test]
    fn test_add_is_unique_by_url() {
        let (_dir, store) = temp_store();

        assert!(store.add("https://example.com", "Example").unwrap());
        assert!(!store.add("https://example.com", "Duplicate").unwrap());

        let list = store.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Example");
        assert!(store.is_bookmarked("https://example.com"));
    }

    #[test]
    fn test_update_rewrites_entry() {
        let (_dir, store) = temp_store();

        store.add("https://example.com", "Example").unwrap();
        assert!(store
            .update("https://example.com", "https://example.org", "Moved")
            .unwrap());
        assert!(!store
            .update("https://missing.test", "https://x.test", "X")
            .unwrap());

        assert!(!store.is_bookmarked("https://example.com"));
        assert!(store.is_bookmarked("https://example.org"));
    }

    #[test]
    fn test_remove() {
        let (_dir, store) = temp_store();

        store.add("https://example.com", "Example").unwrap();
        store.remove("https://example.com").unwrap();
        assert!(store.list().is_empty());
    }
}
