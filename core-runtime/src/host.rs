//! Host bridge bootstrap.
//!
//! Wires a [`BridgeConfig`] into a live channel: builds the handler registry,
//! registers `getPackageInfo` plus any extra capabilities, and attaches the
//! channel to a messenger shared with the managed runtime.

use std::sync::Arc;

use core_bridge::{
    BinaryMessenger, BridgeChannel, CapabilityResponse, HandlerRegistry, MethodChannelClient,
    PackageInfoHandler, GET_PACKAGE_INFO,
};
use tracing::info;

use crate::config::BridgeConfig;
use crate::error::Result;

/// A configured capability channel attached to a messenger.
#[derive(Debug)]
pub struct HostBridge {
    channel: Arc<BridgeChannel>,
    messenger: Arc<BinaryMessenger>,
}

impl HostBridge {
    /// Configure the bridge on a fresh messenger.
    pub fn configure(config: BridgeConfig) -> Result<Self> {
        Self::attach(config, Arc::new(BinaryMessenger::new()))
    }

    /// Configure the bridge on an existing messenger.
    ///
    /// Fails if the messenger already has a channel with the same name.
    pub fn attach(config: BridgeConfig, messenger: Arc<BinaryMessenger>) -> Result<Self> {
        let BridgeConfig {
            channel_name,
            app_name,
            package_manager,
            capabilities,
        } = config;

        let mut registry = HandlerRegistry::new();
        registry.register(
            GET_PACKAGE_INFO,
            PackageInfoHandler::new(app_name, package_manager),
        )?;
        for (method, handler) in capabilities {
            registry.register_arc(method, handler)?;
        }

        let channel = Arc::new(BridgeChannel::new(channel_name, registry));
        messenger.register_channel(Arc::clone(&channel))?;

        info!(
            channel = %channel.name(),
            methods = ?channel.registry().methods(),
            "Capability bridge attached"
        );

        Ok(Self { channel, messenger })
    }

    pub fn channel(&self) -> &Arc<BridgeChannel> {
        &self.channel
    }

    pub fn messenger(&self) -> Arc<BinaryMessenger> {
        Arc::clone(&self.messenger)
    }

    /// Client the managed runtime uses to reach this bridge.
    pub fn client(&self) -> MethodChannelClient {
        MethodChannelClient::new(self.channel.name().as_str(), self.messenger())
    }

    /// Invoke a method directly on the host channel.
    pub fn invoke(&self, method: &str) -> CapabilityResponse {
        self.channel.invoke(method)
    }

    /// Detach the channel from the messenger.
    ///
    /// Managed calls observe `UNIMPLEMENTED` afterwards.
    pub fn detach(&self) -> bool {
        let removed = self
            .messenger
            .remove_message_handler(self.channel.name().as_str());
        if removed {
            info!(channel = %self.channel.name(), "Capability bridge detached");
        }
        removed
    }
}
