//! Per-tab lifecycle phase
//!
//! ```text
//! Created
//!   ↓ first load issued
//! Loading ⇄ Ready        (every navigation loops back through Loading)
//!   ↓ close
//! Closing
//! ```
//!
//! Closing is terminal; the surface is destroyed after a short grace
//! period once the registry entry is gone.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabPhase {
    /// Surface constructed, no load issued yet
    Created,
    /// A load is in flight
    Loading,
    /// Last load completed
    Ready,
    /// Tab removed from the registry, surface teardown pending
    Closing,
}

impl TabPhase {
    pub fn can_transition_to(&self, target: TabPhase) -> bool {
        match (self, target) {
            (TabPhase::Created, TabPhase::Loading) => true,
            (TabPhase::Loading, TabPhase::Ready) => true,
            // A fresh navigation can land while the previous load is
            // still in flight.
            (TabPhase::Loading, TabPhase::Loading) => true,
            (TabPhase::Ready, TabPhase::Loading) => true,
            // Any live phase can begin closing.
            (TabPhase::Created, TabPhase::Closing) => true,
            (TabPhase::Loading, TabPhase::Closing) => true,
            (TabPhase::Ready, TabPhase::Closing) => true,
            _ => false,
        }
    }

    pub fn is_closing(&self) -> bool {
        matches!(self, TabPhase::Closing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabPhase::Created => "created",
            TabPhase::Loading => "loading",
            TabPhase::Ready => "ready",
            TabPhase::Closing => "closing",
        }
    }
}

impl std::fmt::Display for TabPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_cycle() {
        assert!(TabPhase::Created.can_transition_to(TabPhase::Loading));
        assert!(TabPhase::Loading.can_transition_to(TabPhase::Ready));
        assert!(TabPhase::Ready.can_transition_to(TabPhase::Loading));
        assert!(TabPhase::Loading.can_transition_to(TabPhase::Loading));
    }

    #[test]
    fn test_closing_is_terminal() {
        assert!(TabPhase::Ready.can_transition_to(TabPhase::Closing));
        assert!(TabPhase::Loading.can_transition_to(TabPhase::Closing));
        assert!(!TabPhase::Closing.can_transition_to(TabPhase::Loading));
        assert!(!TabPhase::Closing.can_transition_to(TabPhase::Ready));
    }

    #[test]
    fn test_no_ready_before_loading() {
        assert!(!TabPhase::Created.can_transition_to(TabPhase::Ready));
        assert!(!TabPhase::Ready.can_transition_to(TabPhase::Created));
    }
}
