//! The page-hosting surface contract

use serde::Serialize;

/// Identity of the network/storage context a surface's requests run
/// under. Surfaces created with the same partition share one session;
/// distinct sessions have independent cookies and storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which storage partition a new surface is created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoragePartition {
    #[default]
    Default,
    /// Separate storage, dropped on exit. All incognito surfaces share
    /// one session, as all default surfaces share another.
    Incognito,
}

impl StoragePartition {
    pub fn session_id(&self) -> SessionId {
        match self {
            StoragePartition::Default => SessionId::new("default"),
            StoragePartition::Incognito => SessionId::new("incognito"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SurfaceOptions {
    pub partition: StoragePartition,
}

/// On-screen rectangle for an attached surface, in window content
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A computed rectangle plus the stretch flag: when `track_window` is
/// set the surface follows window resizes on its own between explicit
/// re-placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfacePlacement {
    pub rect: Rect,
    pub track_window: bool,
}

impl SurfacePlacement {
    pub fn tracking(rect: Rect) -> Self {
        Self {
            rect,
            track_window: true,
        }
    }
}

/// An isolated page-hosting view, implemented by the host runtime.
///
/// Loads are fire-and-forget: completion and in-page navigation come
/// back to the coordinator as events, in per-surface emission order.
/// `destroy` must be idempotent; the coordinator may call it on a
/// surface whose window is already gone.
pub trait Surface {
    fn load(&mut self, url: &str);
    fn current_url(&self) -> String;
    fn title(&self) -> String;

    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);

    fn session(&self) -> SessionId;

    /// Attach to the window at the given placement.
    fn place(&mut self, placement: SurfacePlacement);
    /// Remove from the window entirely, hiding the surface.
    fn detach(&mut self);

    fn destroy(&mut self);
    fn is_destroyed(&self) -> bool;
}

pub trait SurfaceFactory {
    fn create_surface(&mut self, options: &SurfaceOptions) -> Box<dyn Surface>;
}
