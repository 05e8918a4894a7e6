//! Binary messenger: routes raw payloads between runtimes by channel name.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use bridge_traits::platform::PlatformSendSync;
use bytes::Bytes;
use tracing::debug;

use crate::channel::{BridgeChannel, ChannelName};
use crate::error::{ChannelError, Result};

/// Receives encoded calls for one channel and returns the encoded reply.
pub trait MessageHandler: PlatformSendSync {
    fn on_message(&self, payload: &[u8]) -> Bytes;
}

/// Channel-name router shared by the managed runtime and the host.
///
/// Names must match exactly. A payload sent to a name with no registered
/// handler gets no reply, which the managed side observes as
/// `UNIMPLEMENTED`.
#[derive(Default)]
pub struct BinaryMessenger {
    handlers: RwLock<HashMap<String, Arc<dyn MessageHandler>>>,
}

impl std::fmt::Debug for BinaryMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryMessenger")
            .field("channels", &self.channel_names())
            .finish()
    }
}

impl BinaryMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bridge channel under its own name.
    pub fn register_channel(&self, channel: Arc<BridgeChannel>) -> Result<()> {
        let name = channel.name().clone();
        self.set_message_handler(&name, channel)
    }

    /// Register a raw handler for `name`.
    ///
    /// Fails if another handler already owns the name.
    pub fn set_message_handler(
        &self,
        name: &ChannelName,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<()> {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if handlers.contains_key(name.as_str()) {
            return Err(ChannelError::DuplicateChannel(name.to_string()));
        }

        debug!(channel = %name, "Registered channel");
        handlers.insert(name.to_string(), handler);
        Ok(())
    }

    /// Remove the handler for `name`; returns whether one was registered.
    pub fn remove_message_handler(&self, name: &str) -> bool {
        self.handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(name)
            .is_some()
    }

    /// Deliver `payload` to the channel called `name`.
    ///
    /// Returns `None` when nothing is registered under `name`. The registry
    /// lock is released before the handler runs, so handlers may send
    /// through the same messenger.
    pub fn send(&self, name: &str, payload: &[u8]) -> Option<Bytes> {
        let handler = self
            .handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned();

        match handler {
            Some(handler) => Some(handler.on_message(payload)),
            None => {
                debug!(channel = name, "No handler for channel");
                None
            }
        }
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(name)
    }

    /// Registered channel names, sorted.
    pub fn channel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}
