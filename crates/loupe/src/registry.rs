//! Element → controller registry
//!
//! Initialising a lens on an element is idempotent: the first call creates
//! a controller, later calls reuse it. A controller that was torn down stays
//! registered and is attached again instead of being replaced, so page code
//! holding on to it keeps working.
//!
//! Keys only need `PartialEq`. Browser elements have identity equality but
//! no stable hash, and a page rarely carries more than a handful of lenses.

use tracing::debug;

use crate::controller::ZoomController;
use crate::host::ZoomHost;

/// Something that can be (re)attached to its target
pub trait Attach {
    /// Whether listeners are currently installed
    fn is_attached(&self) -> bool;

    /// Install listeners; returns false when already attached
    fn attach(&mut self) -> bool;
}

impl<H: ZoomHost> Attach for ZoomController<H> {
    fn is_attached(&self) -> bool {
        ZoomController::is_attached(self)
    }

    fn attach(&mut self) -> bool {
        ZoomController::attach(self)
    }
}

/// What [`Registry::attach_with`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attachment {
    /// No entry existed; a new controller was created and attached
    Created,
    /// A torn-down controller was attached again
    Reattached,
    /// The controller was already attached; nothing changed
    AlreadyActive,
}

/// Explicit mapping from element identity to controller
#[derive(Debug)]
pub struct Registry<K, C> {
    entries: Vec<(K, C)>,
}

impl<K, C> Default for Registry<K, C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq, C: Attach> Registry<K, C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the controller for `key`, creating it with `create` if needed
    pub fn attach_with(&mut self, key: K, create: impl FnOnce() -> C) -> Attachment {
        if let Some(controller) = self.get_mut(&key) {
            return if controller.attach() {
                debug!("registry: re-attached torn-down controller");
                Attachment::Reattached
            } else {
                Attachment::AlreadyActive
            };
        }

        let mut controller = create();
        controller.attach();
        self.entries.push((key, controller));
        debug!(count = self.entries.len(), "registry: controller created");
        Attachment::Created
    }

    /// Controller registered for `key`
    pub fn get(&self, key: &K) -> Option<&C> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, c)| c)
    }

    /// Mutable controller registered for `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut C> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c)
    }

    /// Forget the controller for `key` and return it
    ///
    /// The controller is returned as-is; tear it down first if its
    /// listeners should go too.
    pub fn remove(&mut self, key: &K) -> Option<C> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.swap_remove(index).1)
    }

    /// Number of registered controllers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered controllers that are currently attached
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|(_, c)| c.is_attached()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoomConfig;
    use crate::memory::MemoryHost;

    fn lens() -> ZoomController<MemoryHost> {
        ZoomController::new(MemoryHost::new(), ZoomConfig::default())
    }

    #[test]
    fn test_attach_is_idempotent_per_key() {
        let mut registry = Registry::new();

        assert_eq!(registry.attach_with("a", lens), Attachment::Created);
        assert_eq!(registry.attach_with("a", lens), Attachment::AlreadyActive);
        assert_eq!(registry.attach_with("b", lens), Attachment::Created);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&"a").unwrap().host().bind_count(), 1);
    }

    #[test]
    fn test_torn_down_entry_is_reattached() {
        let mut registry = Registry::new();
        registry.attach_with(1u32, lens);

        registry.get_mut(&1).unwrap().teardown();
        assert_eq!(registry.active_count(), 0);

        let mut created = false;
        let outcome = registry.attach_with(1, || {
            created = true;
            lens()
        });
        assert_eq!(outcome, Attachment::Reattached);
        assert!(!created);
        assert_eq!(registry.get(&1).unwrap().host().bind_count(), 2);
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn test_remove() {
        let mut registry = Registry::new();
        registry.attach_with("a", lens);
        registry.attach_with("b", lens);

        let removed = registry.remove(&"a").unwrap();
        assert!(removed.is_attached());
        assert!(registry.get(&"a").is_none());
        assert!(registry.remove(&"a").is_none());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }
}
