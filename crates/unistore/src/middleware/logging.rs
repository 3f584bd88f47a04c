use crate::action::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;

/// LoggingMiddleware - logs all actions passing through
pub struct LoggingMiddleware {
    level: log::Level,
    skip: Vec<String>,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self {
            level: log::Level::Debug,
            skip: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }

    /// Don't log actions of this type (e.g. high-frequency ticks)
    pub fn skip(mut self, action_type: impl Into<String>) -> Self {
        self.skip.push(action_type.into());
        self
    }

    fn should_log(&self, action_type: &str) -> bool {
        !self.skip.iter().any(|t| t == action_type)
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A: Action> Middleware<S, A> for LoggingMiddleware {
    fn handle(&mut self, action: &A, _state: &S, _dispatcher: &Dispatcher<A>) -> bool {
        if self.should_log(action.action_type()) {
            log::log!(self.level, "Action: {:?}", action);
        }

        true // Always pass action through
    }
}
