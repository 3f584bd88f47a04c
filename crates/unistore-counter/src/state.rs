use crate::actions::CounterAction;
use unistore::Store;

/// Counter state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    pub value: i64,
}

impl CounterState {
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    pub fn is_odd(&self) -> bool {
        self.value % 2 != 0
    }
}

pub type CounterStore = Store<CounterState, CounterAction>;
