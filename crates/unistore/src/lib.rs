//! Unidirectional state container
//!
//! A [`Store`] owns one value of application state. The only way to change
//! it is to [`dispatch`](Store::dispatch) an [`Action`]: the store runs the
//! pure [`Reducer`] on the current state, commits the result and then calls
//! every subscribed listener. Listeners read the new value themselves with
//! [`Store::get_state`].
//!
//! ```text
//! dispatch(action) ──→ middleware ──→ reducer ──→ commit ──→ listeners
//!        ↑                                                      │
//!        └──────────────────── caller ←─────────────────────────┘
//! ```
//!
//! The store is synchronous and single-threaded. A dispatch issued while
//! another one is running (from the reducer, a middleware or a listener)
//! fails with [`StoreError::ReentrantDispatch`].
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use unistore::{Action, RawAction, create_store};
//!
//! #[derive(Debug, Default)]
//! struct Counter {
//!     value: i64,
//! }
//!
//! fn counter(state: Rc<Counter>, action: &RawAction) -> Rc<Counter> {
//!     match action.action_type() {
//!         "counter/incremented" => Rc::new(Counter { value: state.value + 1 }),
//!         _ => state,
//!     }
//! }
//!
//! let store = create_store(counter, None);
//! let subscription = store.subscribe(|| {
//!     println!("state changed");
//!     Ok(())
//! });
//!
//! store.dispatch(RawAction::new("counter/incremented"))?;
//! assert_eq!(store.get_state().value, 1);
//!
//! subscription.unsubscribe();
//! # Ok::<(), unistore::StoreError>(())
//! ```

mod action;
mod dispatcher;
mod error;
pub mod middleware;
mod reducer;
mod store;
mod subscription;

pub use action::{Action, INIT_ACTION_TYPE, RawAction, TYPE_FIELD};
pub use dispatcher::Dispatcher;
pub use error::{ListenerError, StoreError};
pub use middleware::{LoggingMiddleware, Middleware};
pub use reducer::Reducer;
pub use store::{Store, StoreBuilder, WeakStore, create_store, create_store_with_state};
pub use subscription::{ListenerId, Subscription};
