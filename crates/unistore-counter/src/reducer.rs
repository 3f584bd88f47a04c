use crate::actions::CounterAction;
use crate::state::CounterState;
use std::rc::Rc;

/// Reducer - pure function that produces new state from current state + action
pub fn reduce(state: Rc<CounterState>, action: &CounterAction) -> Rc<CounterState> {
    let next = match action {
        CounterAction::Incremented => state.value.checked_add(1),
        CounterAction::Decremented => state.value.checked_sub(1),
        CounterAction::IncrementedByAmount { amount } => state.value.checked_add(*amount),
        CounterAction::Unrecognized => {
            // Unhandled actions - hand back the same state
            return state;
        }
    };

    match next {
        Some(value) => Rc::new(CounterState::new(value)),
        None => {
            // Out of i64 range: keep the current value
            log::warn!("{:?} would overflow counter at {}", action, state.value);
            state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use unistore::create_store;

    #[test]
    fn test_increment_twice_then_decrement() {
        let store = create_store(reduce, None);

        store.dispatch(CounterAction::Incremented).unwrap();
        store.dispatch(CounterAction::Incremented).unwrap();
        store.dispatch(CounterAction::Decremented).unwrap();

        assert_eq!(*store.get_state(), CounterState::new(1));
    }

    #[test]
    fn test_amount_can_be_negative() {
        let state = reduce(
            Rc::new(CounterState::new(2)),
            &CounterAction::IncrementedByAmount { amount: -5 },
        );
        assert_eq!(*state, CounterState::new(-3));
    }

    #[test]
    fn test_overflow_at_upper_bound_keeps_state() {
        let store = create_store(reduce, None);
        store
            .dispatch(CounterAction::IncrementedByAmount { amount: i64::MAX })
            .unwrap();

        let before = store.get_state();
        store.dispatch(CounterAction::Incremented).unwrap();
        store
            .dispatch(CounterAction::IncrementedByAmount { amount: 1 })
            .unwrap();

        assert!(Rc::ptr_eq(&before, &store.get_state()));
        assert_eq!(store.get_state().value, i64::MAX);
    }

    #[test]
    fn test_underflow_at_lower_bound_keeps_state() {
        let state = Rc::new(CounterState::new(i64::MIN));

        let next = reduce(Rc::clone(&state), &CounterAction::Decremented);
        assert!(Rc::ptr_eq(&state, &next));

        let next = reduce(
            Rc::clone(&state),
            &CounterAction::IncrementedByAmount { amount: -1 },
        );
        assert!(Rc::ptr_eq(&state, &next));

        let next = reduce(
            Rc::clone(&state),
            &CounterAction::IncrementedByAmount { amount: i64::MAX },
        );
        assert_eq!(next.value, -1);
    }

    #[test]
    fn test_unrecognized_returns_same_state() {
        let state = Rc::new(CounterState::new(9));
        let next = reduce(Rc::clone(&state), &CounterAction::Unrecognized);
        assert!(Rc::ptr_eq(&state, &next));
    }
}
