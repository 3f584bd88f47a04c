use serde::Deserialize;
use unistore::Action;

/// Actions understood by the counter reducer.
///
/// Decoded from open records like `{"type": "counter/incremented"}`; any
/// type the counter doesn't know becomes [`CounterAction::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum CounterAction {
    #[serde(rename = "counter/incremented")]
    Incremented,
    #[serde(rename = "counter/decremented")]
    Decremented,
    #[serde(rename = "counter/incrementedByAmount")]
    IncrementedByAmount { amount: i64 },
    #[serde(other)]
    Unrecognized,
}

impl Action for CounterAction {
    fn action_type(&self) -> &str {
        match self {
            CounterAction::Incremented => "counter/incremented",
            CounterAction::Decremented => "counter/decremented",
            CounterAction::IncrementedByAmount { .. } => "counter/incrementedByAmount",
            CounterAction::Unrecognized => "counter/unrecognized",
        }
    }

    fn init() -> Self {
        CounterAction::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use unistore::RawAction;

    #[test]
    fn test_decode_from_record() {
        let raw = RawAction::try_from(json!({"type": "counter/incrementedByAmount", "amount": 5}))
            .unwrap();
        let action: CounterAction = raw.decode().unwrap();

        assert_eq!(action, CounterAction::IncrementedByAmount { amount: 5 });
        assert_eq!(action.action_type(), raw.action_type());
    }

    #[test]
    fn test_foreign_types_are_unrecognized() {
        let action: CounterAction = RawAction::new("todos/added").decode().unwrap();
        assert_eq!(action, CounterAction::Unrecognized);
    }
}
