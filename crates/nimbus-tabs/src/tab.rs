//! Tab data structure

use serde::Serialize;

use nimbus_surface::Surface;

use crate::error::TabError;
use crate::phase::TabPhase;
use crate::Result;

/// Opaque tab identifier. Monotonically assigned, never reused within
/// a process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tab: the owned page-hosting surface plus per-tab metadata.
/// Owned exclusively by the [`crate::ViewRegistry`].
pub struct Tab {
    id: TabId,
    surface: Box<dyn Surface>,
    is_history_tab: bool,
    phase: TabPhase,
    extracted_videos: Option<Vec<String>>,
    extracted_images: Option<Vec<String>>,
}

impl Tab {
    pub(crate) fn new(id: TabId, surface: Box<dyn Surface>, is_history_tab: bool) -> Self {
        Self {
            id,
            surface,
            is_history_tab,
            phase: TabPhase::Created,
            extracted_videos: None,
            extracted_images: None,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn is_history_tab(&self) -> bool {
        self.is_history_tab
    }

    pub fn phase(&self) -> TabPhase {
        self.phase
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    /// Give up the surface for deferred teardown.
    pub fn into_surface(self) -> Box<dyn Surface> {
        self.surface
    }

    fn transition_to(&mut self, target: TabPhase) -> Result<()> {
        if !self.phase.can_transition_to(target) {
            return Err(TabError::InvalidTransition {
                from: self.phase.to_string(),
                to: target.to_string(),
            });
        }

        tracing::debug!(tab_id = %self.id, from = %self.phase, to = %target, "Tab phase transition");
        self.phase = target;
        Ok(())
    }

    /// A load was issued to the surface.
    pub fn begin_loading(&mut self) -> Result<()> {
        self.transition_to(TabPhase::Loading)
    }

    /// The surface reported load completion (success or failure; a
    /// failed load still leaves the previous document in place).
    pub fn finish_loading(&mut self) -> Result<()> {
        self.transition_to(TabPhase::Ready)
    }

    pub fn begin_closing(&mut self) -> Result<()> {
        self.transition_to(TabPhase::Closing)
    }

    pub fn set_extracted_videos(&mut self, urls: Vec<String>) {
        self.extracted_videos = Some(urls);
    }

    pub fn set_extracted_images(&mut self, urls: Vec<String>) {
        self.extracted_images = Some(urls);
    }

    pub fn extracted_videos(&self) -> &[String] {
        self.extracted_videos.as_deref().unwrap_or_default()
    }

    pub fn extracted_images(&self) -> &[String] {
        self.extracted_images.as_deref().unwrap_or_default()
    }
}
