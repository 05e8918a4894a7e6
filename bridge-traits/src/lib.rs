//! # Host Bridge Traits
//!
//! Platform abstraction traits that each host platform implements so the
//! capability bridge can answer queries about the host.
//!
//! ## Overview
//!
//! This crate defines the contract between the bridge and platform-specific
//! implementations. Each trait represents a piece of host state the bridge
//! reads on behalf of the managed application but that must be obtained
//! differently per platform (desktop, iOS, Android, web).
//!
//! ## Traits
//!
//! - [`PackageManager`](package::PackageManager) - Installed package metadata
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! Desktop implementations live in `bridge-desktop`.
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Platform
//! implementations should:
//!
//! - Convert platform-specific errors to `BridgeError`
//! - Keep the host's own error text in the message, since it is surfaced to
//!   the managed caller as the error detail
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` on native targets (see
//! [`platform::PlatformSendSync`]) because hosts may deliver calls on any
//! thread.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_traits::package::{PackageInfo, PackageManager};
//! use bridge_traits::error::Result;
//!
//! struct FixedHost;
//!
//! impl PackageManager for FixedHost {
//!     fn package_name(&self) -> String {
//!         "com.app.finity".to_string()
//!     }
//!
//!     fn package_info(&self, package_name: &str) -> Result<PackageInfo> {
//!         Ok(PackageInfo::new(package_name, 1).with_version_name("1.0.1"))
//!     }
//! }
//! ```

pub mod error;
pub mod logging;
pub mod package;
pub mod platform;

pub use error::BridgeError;

pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use package::{PackageInfo, PackageManager};
