use crate::dispatcher::Dispatcher;

pub mod logging;

pub use logging::LoggingMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware run in the order they were added to the store, synchronously,
/// inside the dispatch. They see the state as it was before the action.
pub trait Middleware<S, A> {
    /// Handle an action
    ///
    /// - `action`: The action being dispatched
    /// - `state`: Current state (read-only, pre-dispatch)
    /// - `dispatcher`: Queue follow-up actions to dispatch once this one is done
    ///
    /// Returns `true` to continue the chain, `false` to consume the action.
    /// A consumed action never reaches the reducer and notifies nobody.
    fn handle(&mut self, action: &A, state: &S, dispatcher: &Dispatcher<A>) -> bool;
}
