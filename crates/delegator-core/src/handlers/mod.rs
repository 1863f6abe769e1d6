//! Task handlers: the registry that turns a task description into a script.
//!
//! A [`HandlerRegistry`] holds an ordered list of [`TaskHandler`]s plus a
//! fallback. Resolution is first-match-wins; when no handler recognises the
//! task, the fallback synthesizes the script.
//!
//! # Modules
//!
//! - [`builtin`]: `FactorialHandler`, `PlaceholderHandler`

pub mod builtin;

use std::sync::Arc;

use crate::script::Script;

pub use builtin::{FactorialHandler, PlaceholderHandler};

/// A recognised intent and the script it produces.
pub trait TaskHandler: Send + Sync {
    /// Stable identifier used in logs (e.g. "factorial").
    fn name(&self) -> &str;

    /// Whether this handler recognises `task`.
    fn matches(&self, task: &str) -> bool;

    /// Produce the script that solves `task`.
    fn synthesize(&self, task: &str) -> Script;
}

/// Ordered handler list with a fallback.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn TaskHandler>>,
    fallback: Arc<dyn TaskHandler>,
}

impl HandlerRegistry {
    /// A registry with no handlers; every task goes to `fallback`.
    pub fn new(fallback: Arc<dyn TaskHandler>) -> Self {
        Self {
            handlers: Vec::new(),
            fallback,
        }
    }

    /// Factorial handler, placeholder fallback.
    pub fn standard() -> Self {
        Self::new(Arc::new(PlaceholderHandler)).with_handler(Arc::new(FactorialHandler))
    }

    /// Append a handler. Earlier handlers take precedence.
    pub fn with_handler(mut self, handler: Arc<dyn TaskHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Pick the handler for `task`.
    pub fn resolve(&self, task: &str) -> &dyn TaskHandler {
        self.handlers
            .iter()
            .find(|h| h.matches(task))
            .map(|h| h.as_ref())
            .unwrap_or_else(|| self.fallback.as_ref())
    }

    /// Names of the registered handlers in precedence order, fallback last.
    pub fn handler_names(&self) -> Vec<String> {
        self.handlers
            .iter()
            .chain(std::iter::once(&self.fallback))
            .map(|h| h.name().to_string())
            .collect()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handler_names())
            .finish()
    }
}
