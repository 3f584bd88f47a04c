//! Reducer contract
//!
//! A reducer is a pure function `(state, action) -> state`. It must not
//! perform I/O, mutate its inputs, read clocks or draw random numbers.
//!
//! State travels as `Rc<S>`. For an action it does not recognize a reducer
//! returns the `Rc` it was given, so callers can detect a no-op update with
//! [`Rc::ptr_eq`] instead of comparing whole states. Reducers that do change
//! something build a new value, for example with [`Rc::make_mut`] on the
//! state they received (the store still holds its own reference, so this
//! always copies).

use std::rc::Rc;

/// Pure state transition function
pub trait Reducer<S, A> {
    fn reduce(&self, state: Rc<S>, action: &A) -> Rc<S>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(Rc<S>, &A) -> Rc<S>,
{
    fn reduce(&self, state: Rc<S>, action: &A) -> Rc<S> {
        self(state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Tally {
        total: u32,
    }

    fn tally(state: Rc<Tally>, action: &&str) -> Rc<Tally> {
        match *action {
            "add" => Rc::new(Tally {
                total: state.total + 1,
            }),
            _ => state,
        }
    }

    struct Doubler;

    impl Reducer<Tally, &'static str> for Doubler {
        fn reduce(&self, mut state: Rc<Tally>, action: &&'static str) -> Rc<Tally> {
            if *action == "double" {
                Rc::make_mut(&mut state).total *= 2;
            }
            state
        }
    }

    #[test]
    fn test_function_is_a_reducer() {
        let state = Rc::new(Tally::default());
        let next = tally.reduce(state, &"add");
        assert_eq!(next.total, 1);
    }

    #[test]
    fn test_unknown_action_keeps_identity() {
        let state = Rc::new(Tally { total: 4 });
        let next = tally.reduce(Rc::clone(&state), &"other");
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_make_mut_copies_shared_state() {
        let state = Rc::new(Tally { total: 3 });
        let next = Doubler.reduce(Rc::clone(&state), &"double");

        assert_eq!(state.total, 3);
        assert_eq!(next.total, 6);
        assert!(!Rc::ptr_eq(&state, &next));
    }
}
