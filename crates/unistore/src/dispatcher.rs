//! Deferred dispatch for middleware
//!
//! Middleware run while a dispatch is in progress, so they cannot call
//! `Store::dispatch` directly. Instead they hand follow-up actions to the
//! [`Dispatcher`]. The store drains it once the current notification pass has
//! finished, dispatching each queued action in FIFO order through the full
//! chain (middleware, reducer, listeners).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

/// Queue of actions to dispatch after the current dispatch completes
pub struct Dispatcher<A> {
    queue: RefCell<VecDeque<A>>,
}

impl<A: fmt::Debug> Dispatcher<A> {
    pub(crate) fn new() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
        }
    }

    /// Schedule an action to re-enter the store once the current dispatch
    /// has notified its listeners.
    pub fn dispatch(&self, action: A) {
        log::trace!("Dispatcher: queued {:?}", action);
        self.queue.borrow_mut().push_back(action);
    }

    /// Number of actions waiting to be dispatched
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub(crate) fn pop(&self) -> Option<A> {
        self.queue.borrow_mut().pop_front()
    }

    /// Drop everything queued, returning how many actions were discarded
    pub(crate) fn clear(&self) -> usize {
        let mut queue = self.queue.borrow_mut();
        let dropped = queue.len();
        queue.clear();
        dropped
    }
}

impl<A> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pending", &self.queue.borrow().len())
            .finish()
    }
}
