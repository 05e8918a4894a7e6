//! Workspace facade crate.
//!
//! Exposes the bridge crates behind feature flags so host applications can
//! depend on `capability-bridge` alone. With `desktop-shims` (default) the
//! runtime injects the desktop package manager when none is configured.

pub use bridge_traits as host;

#[cfg(any(feature = "runtime", feature = "desktop-shims"))]
pub use core_bridge as bridge;

#[cfg(any(feature = "runtime", feature = "desktop-shims"))]
pub use core_runtime as runtime;
