//! The tab lifecycle and layout coordinator
//!
//! Single-threaded, event-driven: every registry mutation, layout
//! recomputation, and notification dispatch happens on one control
//! thread. The suspension points are the calls that cross into the
//! host surface or a collaborator (loads, scans, the filter-list
//! fetch); a callback that lands after the world moved on must pass a
//! liveness check (tab still registered, still active) before it may
//! touch UI-facing state.

use std::time::{Duration, Instant};

use nimbus_filter::SessionFilterBinder;
use nimbus_navigation::{self as routes, InputResolver};
use nimbus_storage::{BookmarkStore, HistoryStore};
use nimbus_surface::{
    MediaScan, MediaScanner, SessionId, StoragePartition, Surface, SurfaceFactory, SurfaceOptions,
};
use nimbus_tabs::{TabId, ViewRegistry};

use crate::config::Config;
use crate::events::{
    EventBridge, Intent, MediaScanRequest, SurfaceEvent, TabSummary, UiEvent,
};
use crate::layout::{compute_placement, LayoutState, WindowSize};

/// Grace period between dropping a tab and destroying its surface,
/// letting in-flight host messages to that surface drain. Best effort,
/// not a synchronization barrier.
pub const TEARDOWN_GRACE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenTabOptions {
    pub is_history_tab: bool,
}

struct DeferredSurface {
    due: Instant,
    surface: Box<dyn Surface>,
}

pub struct Browser {
    config: Config,
    registry: ViewRegistry,
    active_tab: Option<TabId>,
    layout: LayoutState,
    window: WindowSize,
    incognito: bool,
    binder: SessionFilterBinder,
    resolver: InputResolver,
    history: HistoryStore,
    bookmarks: BookmarkStore,
    factory: Box<dyn SurfaceFactory>,
    bridge: EventBridge,
    graveyard: Vec<DeferredSurface>,
}

impl Browser {
    pub fn new(
        config: Config,
        factory: Box<dyn SurfaceFactory>,
        binder: SessionFilterBinder,
        bridge: EventBridge,
    ) -> Self {
        let history = HistoryStore::open(config.history_path());
        let bookmarks = BookmarkStore::open(config.bookmarks_path());
        let resolver = InputResolver::with_search_engine(config.search_engine.clone());
        let layout = LayoutState {
            sidebar_width: config.sidebar_width,
            ..Default::default()
        };

        Self {
            config,
            registry: ViewRegistry::new(),
            active_tab: None,
            layout,
            window: WindowSize::default(),
            incognito: false,
            binder,
            resolver,
            history,
            bookmarks,
            factory,
            bridge,
            graveyard: Vec::new(),
        }
    }

    // === Tab lifecycle ===

    /// Create a tab and issue its initial load. Does not activate it;
    /// the surface stays detached until a switch attaches it.
    pub async fn open_tab(&mut self, location: Option<&str>, opts: OpenTabOptions) -> TabId {
        let location = location.unwrap_or(self.config.homepage.as_str()).to_string();

        let partition = if self.incognito {
            StoragePartition::Incognito
        } else {
            StoragePartition::Default
        };
        let surface = self
            .factory
            .create_surface(&SurfaceOptions { partition });
        let session = surface.session();

        let id = self.registry.insert(surface, opts.is_history_tab);

        // Failure here is logged inside the binder and never blocks
        // tab creation.
        self.binder.ensure_filtering(&session).await;

        let load_url = self.resolve_load_url(&location);

        if let Some(tab) = self.registry.get_mut(id) {
            if let Err(e) = tab.begin_loading() {
                tracing::warn!(tab_id = %id, error = %e, "Unexpected phase on initial load");
            }
            tab.surface_mut().load(&load_url);
        }

        tracing::info!(tab_id = %id, url = %load_url, "Opened tab");
        id
    }

    pub async fn open_tab_and_switch(
        &mut self,
        location: Option<&str>,
        opts: OpenTabOptions,
    ) -> TabId {
        let id = self.open_tab(location, opts).await;
        self.switch_tab(id);
        id
    }

    /// Make a tab the active one: attach its surface, push navigation
    /// state, the active-tab change, and its session's block count.
    pub fn switch_tab(&mut self, id: TabId) {
        if !self.registry.contains(id) {
            tracing::warn!(tab_id = %id, "Switch requested for unknown tab");
            return;
        }

        // At most one surface is ever attached to the window.
        if let Some(previous) = self.active_tab.filter(|&previous| previous != id) {
            if let Some(tab) = self.registry.get_mut(previous) {
                tab.surface_mut().detach();
            }
        }

        self.active_tab = Some(id);
        self.apply_layout();
        self.send_nav_state();
        self.bridge.push(UiEvent::ActiveTabChanged { id });

        if let Some(tab) = self.registry.get(id) {
            let session = tab.surface().session();
            self.bridge.push(UiEvent::FilterBlockCount {
                count: self.binder.block_count(&session),
            });
        }
    }

    /// Close a tab. The surface is detached immediately when active,
    /// destroyed after [`TEARDOWN_GRACE`], and a replacement active tab
    /// is elected: first remaining in insertion order, or a fresh
    /// default tab when none remain.
    pub async fn close_tab(&mut self, id: TabId) {
        let Some(mut tab) = self.registry.remove(id) else {
            tracing::warn!(tab_id = %id, "Close requested for unknown tab");
            return;
        };

        if let Err(e) = tab.begin_closing() {
            tracing::warn!(tab_id = %id, error = %e, "Unexpected phase on close");
        }

        let was_active = self.active_tab == Some(id);
        let mut surface = tab.into_surface();
        if was_active {
            surface.detach();
        }
        self.graveyard.push(DeferredSurface {
            due: Instant::now() + TEARDOWN_GRACE,
            surface,
        });

        if was_active {
            self.active_tab = None;
            if let Some(next) = self.registry.first_id() {
                self.switch_tab(next);
            } else {
                self.open_tab_and_switch(None, OpenTabOptions::default())
                    .await;
            }
        }

        tracing::info!(tab_id = %id, "Closed tab");
        self.bridge.push(UiEvent::TabClosed { id });
    }

    /// Destroy surfaces whose grace period has elapsed.
    pub fn reap_surfaces(&mut self) {
        self.reap_surfaces_at(Instant::now());
    }

    fn reap_surfaces_at(&mut self, now: Instant) {
        self.graveyard.retain_mut(|deferred| {
            if now < deferred.due {
                return true;
            }
            if !deferred.surface.is_destroyed() {
                deferred.surface.destroy();
            }
            false
        });
    }

    // === Navigation ===

    /// Classify free-text input and load the result on the active tab.
    /// A no-op without an active tab.
    pub fn navigate(&mut self, input: &str) {
        let Some(active) = self.active_tab else {
            return;
        };
        if !self.registry.contains(active) {
            return;
        }

        let resolution = self.resolver.resolve(input);
        let final_url = resolution.into_load_url(&self.config.app_url);

        // The surface may have been detached for an overlay; make sure
        // it is attached and sized before the load goes out.
        self.apply_layout();

        if let Some(tab) = self.registry.get_mut(active) {
            if let Err(e) = tab.begin_loading() {
                tracing::debug!(tab_id = %active, error = %e, "Phase on navigate");
            }
            tab.surface_mut().load(&final_url);
        }

        tracing::info!(tab_id = %active, url = %final_url, "Navigating active tab");
    }

    pub fn go_back(&mut self) {
        if let Some(tab) = self.active_tab.and_then(|id| self.registry.get_mut(id)) {
            tab.surface_mut().go_back();
        }
    }

    pub fn go_forward(&mut self) {
        if let Some(tab) = self.active_tab.and_then(|id| self.registry.get_mut(id)) {
            tab.surface_mut().go_forward();
        }
    }

    pub fn reload(&mut self) {
        if let Some(tab) = self.active_tab.and_then(|id| self.registry.get_mut(id)) {
            tab.surface_mut().reload();
        }
    }

    // === Surface events ===

    /// Handle a lifecycle event from a surface. May hand back a media
    /// scan for the host to run asynchronously; the result comes back
    /// through [`Browser::deliver_media_scan`].
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) -> Option<MediaScanRequest> {
        match event {
            SurfaceEvent::LoadFinished { tab } => self.on_load_finished(tab),
            SurfaceEvent::Navigated { tab, url } => {
                self.on_navigated(tab, &url);
                None
            }
            SurfaceEvent::LoadFailed { tab, error } => {
                self.on_load_failed(tab, &error);
                None
            }
        }
    }

    fn on_load_finished(&mut self, id: TabId) -> Option<MediaScanRequest> {
        // Liveness: the tab may have been closed while the load was in
        // flight. A stale callback is a safe no-op.
        let Some(tab) = self.registry.get_mut(id) else {
            tracing::debug!(tab_id = %id, "Load finished for a closed tab; ignoring");
            return None;
        };

        if let Err(e) = tab.finish_loading() {
            tracing::debug!(tab_id = %id, error = %e, "Phase on load completion");
        }

        let url = tab.surface().current_url();
        let title = routes::display_title(&url, &tab.surface().title());
        let is_history_tab = tab.is_history_tab();
        let internal = routes::is_embedded(&url);

        if !is_history_tab && !internal && !self.incognito {
            if let Err(e) = self.history.record(&url, &title) {
                tracing::error!(error = %e, "Failed to record history");
            }
        }

        self.bridge.push(UiEvent::TabUpdated {
            id,
            title,
            url: routes::display_url(&url),
            is_history_tab,
        });

        if self.active_tab != Some(id) {
            return None;
        }

        self.send_nav_state();

        if internal {
            self.bridge.push(UiEvent::MediaDetected { urls: vec![] });
            None
        } else {
            Some(MediaScanRequest { tab: id, url })
        }
    }

    fn on_navigated(&mut self, id: TabId, url: &str) {
        let Some(tab) = self.registry.get_mut(id) else {
            tracing::debug!(tab_id = %id, "Navigation event for a closed tab; ignoring");
            return;
        };

        if let Err(e) = tab.begin_loading() {
            tracing::debug!(tab_id = %id, error = %e, "Phase on navigation");
        }

        tracing::debug!(tab_id = %id, url = %url, "Tab navigated");

        if self.active_tab == Some(id) {
            self.send_nav_state();
            // Whatever was detected belongs to the previous document.
            self.bridge.push(UiEvent::MediaDetected { urls: vec![] });
        }
    }

    fn on_load_failed(&mut self, id: TabId, error: &str) {
        // No retry; navigation state keeps the previous location.
        tracing::warn!(tab_id = %id, error = %error, "Load failed");

        if let Some(tab) = self.registry.get_mut(id) {
            if let Err(e) = tab.finish_loading() {
                tracing::debug!(tab_id = %id, error = %e, "Phase on load failure");
            }
        }
    }

    /// Deliver an asynchronously produced media scan. A result for a
    /// tab that is no longer active (or no longer exists) is stale and
    /// dropped.
    pub fn deliver_media_scan(&mut self, id: TabId, scan: MediaScan) {
        if self.active_tab != Some(id) || !self.registry.contains(id) {
            tracing::debug!(tab_id = %id, "Dropping stale media scan");
            return;
        }

        self.bridge.push(UiEvent::MediaDetected { urls: scan.videos });
    }

    // === Media extraction ===

    /// Scan the active page for videos and open an internal tab
    /// listing them. Scanner failure degrades to an empty list.
    pub async fn extract_videos(&mut self, scanner: &dyn MediaScanner) -> Option<TabId> {
        let scan = self.scan_active_page(scanner).await?;
        let id = self
            .open_tab_and_switch(Some("/videos"), OpenTabOptions::default())
            .await;
        if let Some(tab) = self.registry.get_mut(id) {
            tab.set_extracted_videos(scan.videos);
        }
        Some(id)
    }

    /// As [`Browser::extract_videos`], for images.
    pub async fn extract_images(&mut self, scanner: &dyn MediaScanner) -> Option<TabId> {
        let scan = self.scan_active_page(scanner).await?;
        let id = self
            .open_tab_and_switch(Some("/images"), OpenTabOptions::default())
            .await;
        if let Some(tab) = self.registry.get_mut(id) {
            tab.set_extracted_images(scan.images);
        }
        Some(id)
    }

    async fn scan_active_page(&mut self, scanner: &dyn MediaScanner) -> Option<MediaScan> {
        let active = self.active_tab?;
        let url = self.registry.get(active)?.surface().current_url();

        match scanner.scan(&url).await {
            Ok(scan) => Some(scan),
            Err(e) => {
                tracing::warn!(error = %e, "Media scan failed; using empty result");
                Some(MediaScan::default())
            }
        }
    }

    pub fn active_extracted_videos(&self) -> Vec<String> {
        self.active_tab
            .and_then(|id| self.registry.get(id))
            .map(|tab| tab.extracted_videos().to_vec())
            .unwrap_or_default()
    }

    pub fn active_extracted_images(&self) -> Vec<String> {
        self.active_tab
            .and_then(|id| self.registry.get(id))
            .map(|tab| tab.extracted_images().to_vec())
            .unwrap_or_default()
    }

    // === Filtering ===

    /// A request was blocked on some session. The running count goes to
    /// the UI only when that session belongs to the active tab.
    pub fn on_request_blocked(&mut self, session: &SessionId, url: &str) {
        let Some(count) = self.binder.record_blocked(session, url) else {
            return;
        };

        let active_session = self
            .active_tab
            .and_then(|id| self.registry.get(id))
            .map(|tab| tab.surface().session());

        if active_session.as_ref() == Some(session) {
            self.bridge.push(UiEvent::FilterBlockCount { count });
        }
    }

    // === UI state ===

    pub fn set_incognito(&mut self, active: bool) {
        // Product decision: affects newly opened tabs only; existing
        // tabs keep their session.
        self.incognito = active;
        self.bridge.push(UiEvent::IncognitoChanged { active });
    }

    pub fn set_chrome_height(&mut self, px: u32) {
        self.layout.chrome_offset = px;
        self.apply_layout();
    }

    pub fn set_overlay_state(
        &mut self,
        sidebar_open: bool,
        reader_active: bool,
        auth_modal_open: bool,
        media_modal_open: bool,
    ) {
        self.layout.sidebar_open = sidebar_open;
        self.layout.reader_active = reader_active;
        self.layout.auth_modal_open = auth_modal_open;
        self.layout.media_modal_open = media_modal_open;
        self.apply_layout();
    }

    /// Only the active tab's surface is resized; inactive surfaces are
    /// not attached to the window.
    pub fn handle_window_resize(&mut self, size: WindowSize) {
        self.window = size;
        self.apply_layout();
    }

    // === Intent dispatch ===

    pub async fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::OpenTab { location } => {
                self.open_tab_and_switch(location.as_deref(), OpenTabOptions::default())
                    .await;
            }
            Intent::SwitchTab { id } => self.switch_tab(id),
            Intent::CloseTab { id } => self.close_tab(id).await,
            Intent::Navigate { input } => self.navigate(&input),
            Intent::GoBack => self.go_back(),
            Intent::GoForward => self.go_forward(),
            Intent::Reload => self.reload(),
            Intent::SetIncognito { active } => self.set_incognito(active),
            Intent::SetChromeHeight { px } => self.set_chrome_height(px),
            Intent::SetOverlayState {
                sidebar_open,
                reader_active,
                auth_modal_open,
                media_modal_open,
            } => self.set_overlay_state(
                sidebar_open,
                reader_active,
                auth_modal_open,
                media_modal_open,
            ),
        }
    }

    // === Queries ===

    pub fn list_tabs(&self) -> Vec<TabSummary> {
        self.registry
            .iter()
            .map(|tab| {
                let url = tab.surface().current_url();
                let title = if tab.is_history_tab() {
                    "History".to_string()
                } else {
                    routes::display_title(&url, &tab.surface().title())
                };

                TabSummary {
                    id: tab.id(),
                    title,
                    url: routes::display_url(&url),
                    is_active: self.active_tab == Some(tab.id()),
                    is_history_tab: tab.is_history_tab(),
                }
            })
            .collect()
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.active_tab
    }

    pub fn tab_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_incognito(&self) -> bool {
        self.incognito
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Internals ===

    fn resolve_load_url(&self, location: &str) -> String {
        if location.starts_with('/') {
            routes::embedded_url(&self.config.app_url, location)
        } else {
            location.to_string()
        }
    }

    fn apply_layout(&mut self) {
        let Some(active) = self.active_tab else {
            return;
        };
        let placement = compute_placement(self.window, &self.layout);
        let Some(tab) = self.registry.get_mut(active) else {
            return;
        };

        match placement {
            Some(placement) => tab.surface_mut().place(placement),
            None => tab.surface_mut().detach(),
        }
    }

    fn send_nav_state(&self) {
        let Some(tab) = self.active_tab.and_then(|id| self.registry.get(id)) else {
            return;
        };

        self.bridge.push(UiEvent::NavigationState {
            url: tab.surface().current_url(),
            can_go_back: tab.surface().can_go_back(),
            can_go_forward: tab.surface().can_go_forward(),
            is_history_tab: tab.is_history_tab(),
        });
    }
}
