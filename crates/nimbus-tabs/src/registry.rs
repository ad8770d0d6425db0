//! View registry
//!
//! Maps tab id to its owned surface and metadata. Single-threaded
//! cooperative access only; the coordinator is the sole owner.

use std::collections::BTreeMap;

use nimbus_surface::Surface;

use crate::tab::{Tab, TabId};

pub struct ViewRegistry {
    /// Keys are monotonic, so BTreeMap iteration is insertion order.
    tabs: BTreeMap<TabId, Tab>,
    next_id: u64,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            tabs: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Record a freshly constructed surface under the next id.
    pub fn insert(&mut self, surface: Box<dyn Surface>, is_history_tab: bool) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        self.tabs.insert(id, Tab::new(id, surface, is_history_tab));

        tracing::info!(tab_id = %id, is_history_tab, "Registered tab");
        id
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.get(&id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.get_mut(&id)
    }

    /// Drop the registry entry, handing the tab back to the caller.
    /// Does not destroy the surface; deferred teardown is the
    /// lifecycle controller's job.
    pub fn remove(&mut self, id: TabId) -> Option<Tab> {
        self.tabs.remove(&id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// First tab in insertion order, the replacement-election candidate
    /// when the active tab closes.
    pub fn first_id(&self) -> Option<TabId> {
        self.tabs.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = TabId> + '_ {
        self.tabs.keys().copied()
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_surface::{SessionId, SurfacePlacement};

    struct StubSurface;

    impl Surface for StubSurface {
        fn load(&mut self, _url: &str) {}
        fn current_url(&self) -> String {
            String::new()
        }
        fn title(&self) -> String {
            String::new()
        }
        fn can_go_back(&self) -> bool {
            false
        }
        fn can_go_forward(&self) -> bool {
            false
        }
        fn go_back(&mut self) {}
        fn go_forward(&mut self) {}
        fn reload(&mut self) {}
        fn session(&self) -> SessionId {
            SessionId::new("default")
        }
        fn place(&mut self, _placement: SurfacePlacement) {}
        fn detach(&mut self) {}
        fn destroy(&mut self) {}
        fn is_destroyed(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut registry = ViewRegistry::new();

        let a = registry.insert(Box::new(StubSurface), false);
        let b = registry.insert(Box::new(StubSurface), false);
        assert!(b > a);

        registry.remove(a);
        registry.remove(b);
        assert!(registry.is_empty());

        let c = registry.insert(Box::new(StubSurface), false);
        assert!(c > b);
    }

    #[test]
    fn test_iteration_is_insertion_order() {
        let mut registry = ViewRegistry::new();

        let a = registry.insert(Box::new(StubSurface), false);
        let b = registry.insert(Box::new(StubSurface), true);
        let c = registry.insert(Box::new(StubSurface), false);

        let ids: Vec<TabId> = registry.ids().collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(registry.first_id(), Some(a));

        registry.remove(a);
        assert_eq!(registry.first_id(), Some(b));
    }

    #[test]
    fn test_remove_returns_tab() {
        let mut registry = ViewRegistry::new();
        let id = registry.insert(Box::new(StubSurface), true);

        let tab = registry.remove(id).unwrap();
        assert_eq!(tab.id(), id);
        assert!(tab.is_history_tab());
        assert!(!registry.contains(id));
        assert!(registry.remove(id).is_none());
    }
}
