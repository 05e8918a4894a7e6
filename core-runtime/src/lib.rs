//! # Core Runtime Module
//!
//! Provides the host-side runtime for the capability bridge:
//! - Configuration management with fail-fast validation
//! - Channel bootstrap onto a shared messenger
//! - Logging and tracing infrastructure
//!
//! ## Overview
//!
//! Hosts build a [`BridgeConfig`](config::BridgeConfig), hand it to
//! [`HostBridge::configure`](host::HostBridge::configure), and give the
//! managed runtime the resulting messenger or client.

pub mod config;
pub mod error;
pub mod host;
pub mod logging;

pub use config::{BridgeConfig, BridgeConfigBuilder, DEFAULT_CHANNEL_NAME};
pub use error::{Error, Result};
pub use host::HostBridge;
