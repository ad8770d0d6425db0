//! Nimbus Core
//!
//! The tab/view lifecycle and layout coordinator: creates, destroys,
//! switches, and resizes isolated page-rendering surfaces, keeps
//! exactly one visible and interactive at a time, and pushes derived
//! navigation state to the UI layer over a one-directional bridge.
//! Rendering, network fetching, and request interception belong to the
//! host runtime behind the surface traits.

mod browser;
mod config;
mod error;
mod events;
mod layout;

pub use browser::{Browser, OpenTabOptions, TEARDOWN_GRACE};
pub use config::Config;
pub use error::CoreError;
pub use events::{EventBridge, Intent, MediaScanRequest, SurfaceEvent, TabSummary, UiEvent};
pub use layout::{compute_placement, LayoutState, WindowSize};

// Re-export the component crates the coordinator stitches together.
pub use nimbus_filter::{FilterError, FilterRuleset, SessionFilterBinder};
pub use nimbus_navigation::{InputResolver, InternalRoute, Resolution};
pub use nimbus_storage::{BookmarkStore, HistoryStore, PageRecord, StorageError, HISTORY_CAP};
pub use nimbus_surface::{
    HttpMediaScanner, MediaScan, MediaScanner, ReaderContent, ReaderExtractor, Rect, SessionId,
    StoragePartition, Surface, SurfaceError, SurfaceFactory, SurfaceOptions, SurfacePlacement,
};
pub use nimbus_tabs::{Tab, TabError, TabId, TabPhase, ViewRegistry};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
