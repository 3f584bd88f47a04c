//! Error types surfaced by the store.

use crate::subscription::ListenerId;
use thiserror::Error;

/// Error a listener returns to abort the current notification pass.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while dispatching an action.
///
/// Every variant is a contract violation by the caller or one of its
/// collaborators. The store never retries and never rolls back a state that
/// was already committed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The action has no usable type discriminator, or the open record
    /// could not be turned into an action at all.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// `dispatch` was called while another dispatch on the same store was
    /// still running (from a reducer, a middleware or a listener).
    #[error("Cannot dispatch while another dispatch is in progress")]
    ReentrantDispatch,

    /// A listener failed during the notification pass. Listeners after it
    /// were not called for that pass.
    #[error("Listener {id} failed: {source}")]
    Listener {
        id: ListenerId,
        source: ListenerError,
    },
}

impl StoreError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidAction(message.into())
    }
}
