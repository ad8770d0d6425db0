//! Layout engine
//!
//! Computes the rectangle for the active surface from the window
//! content size, the UI chrome offset, and the occlusion inputs. An
//! active overlay (reader pane, auth modal, media modal) means the
//! surface detaches entirely so the overlay has the whole window.
//!
//! Recomputed on window resize, on every UI-state change, and right
//! after an active-tab switch; in between, attached surfaces stretch
//! with the window on their own (`track_window`).

use nimbus_surface::{Rect, SurfacePlacement};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Process-wide occlusion state, mutated by UI-state-change intents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutState {
    /// Height of the tab strip / address bar chrome above the surface
    pub chrome_offset: u32,
    pub sidebar_open: bool,
    pub sidebar_width: u32,
    pub reader_active: bool,
    pub auth_modal_open: bool,
    pub media_modal_open: bool,
}

impl LayoutState {
    /// Whether any overlay needs full UI control (surface detached).
    pub fn overlay_active(&self) -> bool {
        self.reader_active || self.auth_modal_open || self.media_modal_open
    }
}

/// None means: detach the surface from the window entirely.
pub fn compute_placement(window: WindowSize, state: &LayoutState) -> Option<SurfacePlacement> {
    if state.overlay_active() {
        return None;
    }

    let x = if state.sidebar_open {
        state.sidebar_width
    } else {
        0
    };

    Some(SurfacePlacement::tracking(Rect {
        x,
        y: state.chrome_offset,
        width: window.width.saturating_sub(x),
        height: window.height.saturating_sub(state.chrome_offset),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_window() {
        let state = LayoutState {
            chrome_offset: 88,
            ..Default::default()
        };

        let placement = compute_placement(WindowSize::new(1200, 800), &state).unwrap();
        assert_eq!(
            placement.rect,
            Rect {
                x: 0,
                y: 88,
                width: 1200,
                height: 712
            }
        );
        assert!(placement.track_window);
    }

    #[test]
    fn test_sidebar_occlusion() {
        let state = LayoutState {
            chrome_offset: 88,
            sidebar_open: true,
            sidebar_width: 280,
            ..Default::default()
        };

        let placement = compute_placement(WindowSize::new(1200, 800), &state).unwrap();
        assert_eq!(
            placement.rect,
            Rect {
                x: 280,
                y: 88,
                width: 920,
                height: 712
            }
        );
    }

    #[test]
    fn test_overlay_detaches() {
        for state in [
            LayoutState {
                reader_active: true,
                ..Default::default()
            },
            LayoutState {
                auth_modal_open: true,
                ..Default::default()
            },
            LayoutState {
                media_modal_open: true,
                ..Default::default()
            },
        ] {
            assert!(compute_placement(WindowSize::new(1200, 800), &state).is_none());
        }
    }

    #[test]
    fn test_degenerate_window_clamps_to_zero() {
        let state = LayoutState {
            chrome_offset: 900,
            sidebar_open: true,
            sidebar_width: 280,
            ..Default::default()
        };

        let placement = compute_placement(WindowSize::new(200, 800), &state).unwrap();
        assert_eq!(placement.rect.width, 0);
        assert_eq!(placement.rect.height, 0);
    }
}
