//! Actions: typed intents and the open transport record they are decoded from.
//!
//! Reducers work on closed enums. At the edges of an application actions
//! often arrive as loose records (`{"type": "counter/incremented", ...}`),
//! which [`RawAction`] models. A typed enum usually derives
//! `serde::Deserialize` with `#[serde(tag = "type")]` so that
//! [`RawAction::decode`] can turn one into the other.

use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Type of the action fed to the reducer once when a store is created.
pub const INIT_ACTION_TYPE: &str = "@@unistore/INIT";

/// Field of an open record that carries the type discriminator.
pub const TYPE_FIELD: &str = "type";

/// An action the store can dispatch.
pub trait Action: fmt::Debug {
    /// Type discriminator of this action.
    ///
    /// An empty discriminator is rejected by `dispatch` with
    /// [`StoreError::InvalidAction`].
    fn action_type(&self) -> &str;

    /// The distinguished action a store feeds its reducer during
    /// construction. Reducers are expected not to recognize it and to return
    /// their initial state.
    fn init() -> Self
    where
        Self: Sized;
}

/// Open action record: a type discriminator plus arbitrary payload fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct RawAction {
    action_type: String,
    payload: Map<String, Value>,
}

impl RawAction {
    /// Create a record without payload
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Map::new(),
        }
    }

    /// Add a payload field
    ///
    /// A field named `type` is ignored, the discriminator is fixed at
    /// construction.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key == TYPE_FIELD {
            log::warn!("Ignoring payload field `{}` on `{}`", TYPE_FIELD, self.action_type);
        } else {
            self.payload.insert(key, value.into());
        }
        self
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Decode this record into a typed action.
    ///
    /// Fails with [`StoreError::InvalidAction`] when the payload does not
    /// match the shape the typed action expects for this type.
    pub fn decode<A: DeserializeOwned>(&self) -> Result<A, StoreError> {
        serde_json::from_value(Value::from(self.clone())).map_err(|e| {
            StoreError::invalid(format!("cannot decode `{}`: {}", self.action_type, e))
        })
    }
}

impl Action for RawAction {
    fn action_type(&self) -> &str {
        &self.action_type
    }

    fn init() -> Self {
        Self::new(INIT_ACTION_TYPE)
    }
}

impl TryFrom<Value> for RawAction {
    type Error = StoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut payload = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(StoreError::invalid(format!(
                    "expected a record, got {}",
                    value_kind(&other)
                )));
            }
        };

        let action_type = match payload.remove(TYPE_FIELD) {
            Some(Value::String(t)) if !t.is_empty() => t,
            Some(Value::String(_)) => return Err(StoreError::invalid("empty `type` field")),
            Some(other) => {
                return Err(StoreError::invalid(format!(
                    "`type` must be a string, got {}",
                    value_kind(&other)
                )));
            }
            None => return Err(StoreError::invalid("missing `type` field")),
        };

        Ok(Self {
            action_type,
            payload,
        })
    }
}

impl From<RawAction> for Value {
    fn from(action: RawAction) -> Self {
        let mut fields = action.payload;
        fields.insert(TYPE_FIELD.to_string(), Value::String(action.action_type));
        Value::Object(fields)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a record",
    }
}
