//! Subscriber registry and the handles returned by `Store::subscribe`.

use crate::error::ListenerError;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identity of one registration.
///
/// Ids grow monotonically, so ordering by id is registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) type Listener = Rc<RefCell<dyn FnMut() -> Result<(), ListenerError>>>;

/// Ordered collection of active listeners
#[derive(Default)]
pub(crate) struct Registry {
    next_id: u64,
    listeners: BTreeMap<ListenerId, Listener>,
}

impl Registry {
    pub(crate) fn insert(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    /// Copy of the active listeners in registration order.
    ///
    /// A notification pass iterates this copy, never the live map, so
    /// listeners may subscribe and unsubscribe while being notified.
    pub(crate) fn snapshot(&self) -> Vec<(ListenerId, Listener)> {
        self.listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
    }
}

/// Handle to one listener registration.
///
/// Dropping the handle leaves the listener registered; call
/// [`Subscription::unsubscribe`] to remove it. Handles are cheap to clone
/// and every clone refers to the same registration.
#[derive(Clone)]
#[must_use = "the listener stays registered; keep the handle to be able to unsubscribe"]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, registry: &Rc<RefCell<Registry>>) -> Self {
        Self {
            id,
            registry: Rc::downgrade(registry),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener from its store.
    ///
    /// Returns `true` if this call removed it, `false` if it was already
    /// gone (unsubscribed before, registry cleared, or store dropped).
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = registry.borrow_mut().remove(self.id);
        if removed {
            log::trace!("Listener {} unsubscribed", self.id);
        }
        removed
    }

    /// Whether the registration is still active
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let active = registry.borrow().contains(self.id);
        active
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
