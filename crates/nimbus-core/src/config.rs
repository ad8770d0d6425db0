//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use nimbus_navigation::DEFAULT_SEARCH_TEMPLATE;

/// Default width reserved for the sidebar when it is open.
pub(crate) const DEFAULT_SIDEBAR_WIDTH: u32 = 280;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for history/bookmark files
    pub data_dir: PathBuf,
    /// URL of the application's own UI bundle, loaded for internal
    /// pages in chrome-less embedded mode
    pub app_url: String,
    /// Search engine URL template (`%s` is the encoded query)
    pub search_engine: String,
    /// Internal path opened for fresh default tabs
    pub homepage: String,
    /// Prebuilt filter lists, fetched once per process
    pub filter_list_urls: Vec<String>,
    /// Sidebar occlusion width in pixels
    pub sidebar_width: u32,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            app_url: "app://ui/index.html".to_string(),
            search_engine: DEFAULT_SEARCH_TEMPLATE.to_string(),
            homepage: "/home".to_string(),
            filter_list_urls: vec![
                "https://easylist.to/easylist/easylist.txt".to_string(),
                "https://easylist.to/easylist/easyprivacy.txt".to_string(),
            ],
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }

    pub fn bookmarks_path(&self) -> PathBuf {
        self.data_dir.join("bookmarks.json")
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Nimbus"))
            .unwrap_or_else(|| PathBuf::from(".nimbus"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
