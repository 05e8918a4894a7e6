//! # Capability Bridge
//!
//! Lets a managed application runtime obtain host-platform information on
//! demand through a named, bidirectional channel.
//!
//! ## Overview
//!
//! - [`BridgeChannel`](channel::BridgeChannel) routes named method calls to
//!   registered handlers and returns exactly one result or error per call.
//! - [`HandlerRegistry`](registry::HandlerRegistry) maps method names to
//!   [`CapabilityHandler`](handler::CapabilityHandler)s.
//! - [`CapabilityResult`](types::CapabilityResult) is the ordered string
//!   mapping handlers produce.
//! - [`JsonMethodCodec`](codec::JsonMethodCodec),
//!   [`BinaryMessenger`](messenger::BinaryMessenger) and
//!   [`MethodChannelClient`](client::MethodChannelClient) carry calls across
//!   the runtime boundary as bytes.
//!
//! ## Usage
//!
//! ```ignore
//! use core_bridge::{BridgeChannel, ChannelName, HandlerRegistry, PackageInfoHandler, GET_PACKAGE_INFO};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register(GET_PACKAGE_INFO, PackageInfoHandler::new("Finity", package_manager))?;
//!
//! let channel = BridgeChannel::new(ChannelName::new("com.app.finity/package_info")?, registry);
//! let response = channel.invoke(GET_PACKAGE_INFO);
//! ```
//!
//! ## Error Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | `UNIMPLEMENTED` | No handler for the method, or no channel under the name |
//! | `PACKAGE_INFO_ERROR` | Host package lookup failed |
//! | `HANDLER_FAULT` | A handler panicked; the channel stays usable |
//! | `CODEC_ERROR` | A call or reply could not be decoded |

pub mod channel;
pub mod client;
pub mod codec;
pub mod error;
pub mod handler;
pub mod messenger;
pub mod package_info;
pub mod registry;
pub mod types;

pub use channel::{BridgeChannel, ChannelName};
pub use client::MethodChannelClient;
pub use codec::JsonMethodCodec;
pub use error::{ChannelError, Result};
pub use handler::{CapabilityHandler, HandlerOutcome};
pub use messenger::{BinaryMessenger, MessageHandler};
pub use package_info::{PackageInfoHandler, GET_PACKAGE_INFO};
pub use registry::HandlerRegistry;
pub use types::{CapabilityError, CapabilityRequest, CapabilityResponse, CapabilityResult};
