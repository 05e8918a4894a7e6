//! Handler registry keyed by method name.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ChannelError, Result};
use crate::handler::{CapabilityHandler, HandlerOutcome};
use crate::types::CapabilityRequest;

/// Maps method names to the handlers that answer them.
///
/// Capabilities register independently; adding one never touches dispatch
/// code. Names are matched exactly and case-sensitively.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn CapabilityHandler>>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `method`.
    ///
    /// Fails if the method name is empty or already taken.
    pub fn register<H>(&mut self, method: impl Into<String>, handler: H) -> Result<()>
    where
        H: CapabilityHandler + 'static,
    {
        self.register_arc(method, Arc::new(handler))
    }

    /// Register a closure as the handler for `method`.
    pub fn register_fn<F>(&mut self, method: impl Into<String>, handler: F) -> Result<()>
    where
        F: Fn(&CapabilityRequest) -> HandlerOutcome + CapabilityHandler + 'static,
    {
        self.register_arc(method, Arc::new(handler))
    }

    /// Register an already shared handler for `method`.
    pub fn register_arc(
        &mut self,
        method: impl Into<String>,
        handler: Arc<dyn CapabilityHandler>,
    ) -> Result<()> {
        let method = method.into();
        if method.is_empty() {
            return Err(ChannelError::EmptyMethodName);
        }
        if self.handlers.contains_key(&method) {
            return Err(ChannelError::DuplicateHandler(method));
        }

        debug!(method = %method, "Registered capability handler");
        self.handlers.insert(method, handler);
        Ok(())
    }

    /// Remove the handler for `method`, returning it if present.
    pub fn unregister(&mut self, method: &str) -> Option<Arc<dyn CapabilityHandler>> {
        self.handlers.remove(method)
    }

    pub fn get(&self, method: &str) -> Option<Arc<dyn CapabilityHandler>> {
        self.handlers.get(method).cloned()
    }

    pub fn contains(&self, method: &str) -> bool {
        self.handlers.contains_key(method)
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.handlers.keys().cloned().collect();
        methods.sort();
        methods
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
