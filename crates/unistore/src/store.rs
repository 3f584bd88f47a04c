use crate::action::{Action, RawAction};
use crate::dispatcher::Dispatcher;
use crate::error::{ListenerError, StoreError};
use crate::middleware::Middleware;
use crate::reducer::Reducer;
use crate::subscription::{Listener, Registry, Subscription};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Store - holds application state and manages the dispatch loop
///
/// The Store follows the Redux pattern:
/// - One current state, replaced (never mutated) on each action
/// - Actions are dispatched to change state
/// - A pure reducer computes the next state
/// - Listeners are notified after every committed change
///
/// `Store` is a cheap handle around shared, single-threaded internals:
/// clone it to hand it to listeners or to other parts of the application.
/// It is neither `Send` nor `Sync`; dispatches from other threads must be
/// funneled to the owning thread (e.g. through a channel).
///
/// # Dispatch loop
///
/// 1. The action is validated and the reentrancy guard is taken.
/// 2. Middleware see the action and may consume it.
/// 3. The reducer runs on the current state; its result is committed.
/// 4. A snapshot of the listeners is notified in registration order.
///    A listener unsubscribed before its turn is skipped, one subscribed
///    during the pass waits for the next dispatch.
/// 5. Actions queued by middleware via the [`Dispatcher`] are dispatched.
pub struct Store<S, A> {
    inner: Rc<Inner<S, A>>,
}

struct Inner<S, A> {
    state: RefCell<Rc<S>>,
    reducer: RefCell<Rc<dyn Reducer<S, A>>>,
    registry: Rc<RefCell<Registry>>,
    middleware: RefCell<Vec<Box<dyn Middleware<S, A>>>>,
    dispatcher: Dispatcher<A>,
    dispatching: Cell<bool>,
}

/// Create a store and run the reducer's initialization call.
///
/// The reducer is invoked once with `(preloaded_state or S::default(),
/// A::init())`; its result becomes the initial state.
pub fn create_store<S, A, R>(reducer: R, preloaded_state: Option<S>) -> Store<S, A>
where
    S: Default + 'static,
    A: Action + 'static,
    R: Reducer<S, A> + 'static,
{
    Store::builder(reducer).build_with(preloaded_state.unwrap_or_default())
}

/// Create a store from a preloaded state
///
/// Same as [`create_store`] with `Some(state)`, without requiring
/// `S: Default`.
pub fn create_store_with_state<S, A, R>(reducer: R, state: S) -> Store<S, A>
where
    S: 'static,
    A: Action + 'static,
    R: Reducer<S, A> + 'static,
{
    Store::builder(reducer).build_with(state)
}

impl<S: 'static, A: Action + 'static> Store<S, A> {
    /// Start building a store around `reducer`
    pub fn builder<R: Reducer<S, A> + 'static>(reducer: R) -> StoreBuilder<S, A> {
        StoreBuilder {
            reducer: Rc::new(reducer),
            preloaded_state: None,
            middleware: Vec::new(),
        }
    }

    /// Get the current committed state
    ///
    /// While a dispatch is in flight this is the pre-dispatch state until the
    /// reducer's result has been committed.
    pub fn get_state(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    /// Dispatch an action: run middleware, reduce, commit and notify
    ///
    /// Returns the state committed once the action and every follow-up
    /// action queued by middleware have been processed.
    ///
    /// A follow-up that fails (invalid, or a listener error) makes this call
    /// return that error even though `action` itself was already committed
    /// and notified. Later follow-ups are dropped. Compare [`Store::get_state`]
    /// with the state before the call to tell the two cases apart.
    pub fn dispatch(&self, action: A) -> Result<Rc<S>, StoreError> {
        validate(&action)?;
        if self.is_dispatching() {
            log::warn!(
                "Rejected `{}`: dispatch already in progress",
                action.action_type()
            );
            return Err(StoreError::ReentrantDispatch);
        }

        let mut next = Some(action);
        let mut follow_up = false;
        while let Some(action) = next {
            let action_type = follow_up.then(|| action.action_type().to_string());
            let result = validate(&action).and_then(|()| self.process(action));
            if let Err(err) = result {
                if let Some(action_type) = action_type {
                    log::warn!(
                        "Queued follow-up `{}` failed after the dispatched action was committed: {}",
                        action_type,
                        err
                    );
                }
                let dropped = self.inner.dispatcher.clear();
                if dropped > 0 {
                    log::warn!("Dropped {} queued action(s) after failed dispatch", dropped);
                }
                return Err(err);
            }
            next = self.inner.dispatcher.pop();
            follow_up = true;
        }

        Ok(self.get_state())
    }

    /// Dispatch an open action record such as `{"type": "counter/incremented"}`
    ///
    /// The record must be a JSON object with a non-empty string `type`; it is
    /// decoded into `A` before being dispatched.
    pub fn dispatch_value(&self, value: Value) -> Result<Rc<S>, StoreError>
    where
        A: DeserializeOwned,
    {
        let raw = RawAction::try_from(value)?;
        let action = raw.decode::<A>()?;
        self.dispatch(action)
    }

    /// Register a listener to be called after every committed dispatch
    ///
    /// Listeners take no arguments; they read the new state with
    /// [`Store::get_state`] (keep a [`WeakStore`] to avoid a reference cycle).
    /// Registering the same closure twice yields two independent
    /// registrations.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut() -> Result<(), ListenerError> + 'static,
    {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let id = self.inner.registry.borrow_mut().insert(listener);
        log::trace!("Listener {} subscribed", id);
        Subscription::new(id, &self.inner.registry)
    }

    /// Swap the reducer used by subsequent dispatches
    ///
    /// The current state is kept and nobody is notified. A dispatch already
    /// in flight finishes with the reducer it started with.
    pub fn replace_reducer<R: Reducer<S, A> + 'static>(&self, reducer: R) {
        *self.inner.reducer.borrow_mut() = Rc::new(reducer);
        log::debug!("Reducer replaced");
    }

    pub fn is_dispatching(&self) -> bool {
        self.inner.dispatching.get()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    /// Release every listener registration
    pub fn clear_subscribers(&self) {
        self.inner.registry.borrow_mut().clear();
    }

    /// Non-owning handle, for listeners that need to read the store
    pub fn downgrade(&self) -> WeakStore<S, A> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// One full pass for a validated action. Caller checked reentrancy.
    fn process(&self, action: A) -> Result<(), StoreError> {
        let _guard = DispatchGuard::enter(&self.inner.dispatching);
        let current = self.get_state();

        if !self.run_middleware(&action, &current) {
            log::debug!("Action `{}` consumed by middleware", action.action_type());
            return Ok(());
        }

        let reducer = Rc::clone(&self.inner.reducer.borrow());
        let next = reducer.reduce(Rc::clone(&current), &action);
        if Rc::ptr_eq(&current, &next) {
            log::trace!("Action `{}` left state unchanged", action.action_type());
        }
        *self.inner.state.borrow_mut() = next;

        self.notify()
    }

    fn run_middleware(&self, action: &A, state: &S) -> bool {
        let mut chain = self.inner.middleware.borrow_mut();
        chain
            .iter_mut()
            .all(|middleware| middleware.handle(action, state, &self.inner.dispatcher))
    }

    fn notify(&self) -> Result<(), StoreError> {
        let snapshot = self.inner.registry.borrow().snapshot();

        for (id, listener) in snapshot {
            // Unsubscribed earlier in this pass
            if !self.inner.registry.borrow().contains(id) {
                log::trace!("Skipping listener {}: unsubscribed during notification", id);
                continue;
            }

            let mut callback = listener.borrow_mut();
            if let Err(source) = (&mut *callback)() {
                log::warn!("Listener {} failed: {}", id, source);
                return Err(StoreError::Listener { id, source });
            }
        }

        Ok(())
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.inner.state.borrow())
            .field("listeners", &self.inner.registry.borrow().len())
            .field("dispatching", &self.inner.dispatching.get())
            .finish()
    }
}

/// Non-owning store handle
pub struct WeakStore<S, A> {
    inner: Weak<Inner<S, A>>,
}

impl<S, A> WeakStore<S, A> {
    /// `None` once every `Store` handle has been dropped
    pub fn upgrade(&self) -> Option<Store<S, A>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<S, A> Clone for WeakStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

/// Builder for [`Store`]: preloaded state and middleware
pub struct StoreBuilder<S, A> {
    reducer: Rc<dyn Reducer<S, A>>,
    preloaded_state: Option<S>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
}

impl<S: 'static, A: Action + 'static> StoreBuilder<S, A> {
    /// State handed to the reducer's initialization call instead of
    /// `S::default()`
    pub fn preloaded_state(mut self, state: S) -> Self {
        self.preloaded_state = Some(state);
        self
    }

    /// Add middleware to the store
    ///
    /// Middleware is called in the order it was added.
    pub fn middleware<M: Middleware<S, A> + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Run the reducer's initialization call and create the store
    ///
    /// Uses the preloaded state if one was set, `S::default()` otherwise.
    pub fn build(mut self) -> Store<S, A>
    where
        S: Default,
    {
        let preloaded = self.preloaded_state.take().unwrap_or_default();
        self.build_with(preloaded)
    }

    /// Run the reducer's initialization call on `preloaded` and create the
    /// store. Takes precedence over [`StoreBuilder::preloaded_state`].
    ///
    /// The init action bypasses middleware; no listener exists yet.
    pub fn build_with(self, preloaded: S) -> Store<S, A> {
        let init = A::init();
        let state = self.reducer.reduce(Rc::new(preloaded), &init);
        log::debug!(
            "Store initialized with `{}` ({} middleware)",
            init.action_type(),
            self.middleware.len()
        );

        Store {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                reducer: RefCell::new(self.reducer),
                registry: Rc::new(RefCell::new(Registry::default())),
                middleware: RefCell::new(self.middleware),
                dispatcher: Dispatcher::new(),
                dispatching: Cell::new(false),
            }),
        }
    }
}

fn validate<A: Action>(action: &A) -> Result<(), StoreError> {
    if action.action_type().is_empty() {
        return Err(StoreError::invalid(format!(
            "action has no type discriminator: {:?}",
            action
        )));
    }
    Ok(())
}

/// Holds the in-flight flag for the duration of one dispatch pass; clears it
/// on drop, including when a reducer or listener panics.
struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
