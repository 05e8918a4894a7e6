//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! Desktop hosts have no system package database, so this crate provides
//! `PackageManager` implementations for the ways a desktop shell knows its
//! own identity:
//! - `InstalledPackages` - in-memory install table (shell-managed installs, tests)
//! - `ManifestPackageManager` - JSON manifest written by the installer
//! - `BuildPackageManager` - metadata compiled into the host binary
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::BuildPackageManager;
//! use std::sync::Arc;
//!
//! let pm = Arc::new(BuildPackageManager::from_cargo(
//!     "com.app.finity",
//!     env!("CARGO_PKG_VERSION"),
//!     1,
//! ));
//! // Hand to the runtime configuration
//! ```

mod build_info;
mod installed;
mod manifest;

pub use build_info::BuildPackageManager;
pub use installed::InstalledPackages;
pub use manifest::ManifestPackageManager;
