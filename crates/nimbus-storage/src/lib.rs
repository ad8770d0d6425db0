//! Nimbus flat-file persistence
//!
//! History and bookmarks are stored as JSON arrays on disk, keyed by
//! URL. Both collections dedup by URL; history is additionally capped
//! to the most recent entries, newest first. Every mutation rewrites
//! the backing file.

mod bookmarks;
mod error;
mod history;
mod record;

pub use bookmarks::BookmarkStore;
pub use error::StorageError;
pub use history::{HistoryStore, HISTORY_CAP};
pub use record::PageRecord;

pub type Result<T> = std::result::Result<T, StorageError>;
