//! Helpers that decide *whether* or *when* to dispatch.
//!
//! The store itself only knows how to apply an action; anything conditional
//! or delayed lives out here and ends up as a plain `dispatch` call.

use crate::actions::CounterAction;
use crate::state::CounterStore;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use unistore::StoreError;

/// Dispatch `counter/incremented` only when the current value is odd
///
/// Returns whether an action was dispatched.
pub fn increment_if_odd(store: &CounterStore) -> Result<bool, StoreError> {
    if !store.get_state().is_odd() {
        log::debug!("increment_if_odd: value is even, nothing to do");
        return Ok(false);
    }

    store.dispatch(CounterAction::Incremented)?;
    Ok(true)
}

/// Send `counter/incremented` to the action channel after `delay`
///
/// The store is never touched from the timer task; the main loop receives
/// the action and dispatches it like any other input.
pub fn increment_async(delay: Duration, actions: UnboundedSender<CounterAction>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if actions.send(CounterAction::Incremented).is_err() {
            log::warn!("increment_async: action channel closed, dropping increment");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reduce;
    use crate::state::CounterState;
    use std::rc::Rc;
    use tokio::sync::mpsc;
    use unistore::create_store;

    #[test]
    fn test_even_value_is_left_alone() {
        let store = create_store(reduce, None);
        let before = store.get_state();

        assert!(!increment_if_odd(&store).unwrap());
        assert!(Rc::ptr_eq(&before, &store.get_state()));
        assert_eq!(store.get_state().value, 0);
    }

    #[test]
    fn test_odd_value_is_incremented_once() {
        let store = create_store(reduce, Some(CounterState::new(3)));

        assert!(increment_if_odd(&store).unwrap());
        assert_eq!(store.get_state().value, 4);

        // Now even, so a second call is a no-op
        assert!(!increment_if_odd(&store).unwrap());
        assert_eq!(store.get_state().value, 4);
    }

    #[tokio::test]
    async fn test_increment_async_sends_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = increment_async(Duration::from_millis(10), tx);
        assert_eq!(rx.recv().await, Some(CounterAction::Incremented));

        handle.await.unwrap();
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_increment_async_survives_closed_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        increment_async(Duration::from_millis(1), tx).await.unwrap();
    }
}
