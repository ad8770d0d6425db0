//! The UI boundary: intents in, notifications out
//!
//! Message passing only, no shared memory. Notifications are
//! one-directional pushes; a UI that has gone away is logged and
//! ignored, never an error.

use serde::Serialize;
use tokio::sync::mpsc;

use nimbus_tabs::TabId;

/// Notification pushed from the coordinator to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiEvent {
    TabUpdated {
        id: TabId,
        title: String,
        url: String,
        is_history_tab: bool,
    },
    ActiveTabChanged {
        id: TabId,
    },
    TabClosed {
        id: TabId,
    },
    NavigationState {
        url: String,
        can_go_back: bool,
        can_go_forward: bool,
        is_history_tab: bool,
    },
    MediaDetected {
        urls: Vec<String>,
    },
    FilterBlockCount {
        count: u64,
    },
    IncognitoChanged {
        active: bool,
    },
}

/// Intent issued by the UI layer.
#[derive(Debug, Clone)]
pub enum Intent {
    OpenTab { location: Option<String> },
    SwitchTab { id: TabId },
    CloseTab { id: TabId },
    Navigate { input: String },
    GoBack,
    GoForward,
    Reload,
    SetIncognito { active: bool },
    SetChromeHeight { px: u32 },
    SetOverlayState {
        sidebar_open: bool,
        reader_active: bool,
        auth_modal_open: bool,
        media_modal_open: bool,
    },
}

/// Answer to the list-tabs query: computed display title and URL, with
/// the embedded-mode marker stripped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSummary {
    pub id: TabId,
    pub title: String,
    pub url: String,
    pub is_active: bool,
    pub is_history_tab: bool,
}

/// Lifecycle event emitted by a page-hosting surface, delivered in
/// per-surface emission order. There is no ordering guarantee across
/// different tabs' events.
#[derive(Debug, Clone)]
pub enum SurfaceEvent {
    LoadFinished { tab: TabId },
    Navigated { tab: TabId, url: String },
    LoadFailed { tab: TabId, error: String },
}

/// A media scan the host should run asynchronously, feeding the result
/// back through [`crate::Browser::deliver_media_scan`]. The
/// coordinator drops stale results itself.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaScanRequest {
    pub tab: TabId,
    pub url: String,
}

/// Sender half of the notification channel.
pub struct EventBridge {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventBridge {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn push(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("UI receiver gone; notification dropped");
        }
    }
}

impl Clone for EventBridge {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}
