//! # Bridge Configuration Module
//!
//! Provides configuration management for the host side of the capability
//! bridge.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `BridgeConfig` holding the channel identity and the host adapters the
//! handlers read from. It enforces fail-fast validation so a misconfigured
//! bridge is rejected at startup instead of answering every call with an
//! error.
//!
//! ## Required Dependencies
//!
//! - `PackageManager` - Source of installed package metadata
//!
//! When the `desktop-shims` feature is enabled and a build version is given,
//! a `BuildPackageManager` is injected automatically if no package manager
//! was provided. The build number set with `build_number` is reported as-is;
//! without one it is derived from the version.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::BridgeConfig;
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::builder()
//!     .channel_name("com.app.finity/package_info")
//!     .app_name("Finity")
//!     .package_manager(Arc::new(MyPackageManager))
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::BridgeConfig;
//!
//! // No application name
//! let config = BridgeConfig::builder()
//!     .build()
//!     .expect("Should fail - missing application name");
//! ```

use crate::error::{Error, Result};
use bridge_traits::PackageManager;
use core_bridge::{CapabilityHandler, ChannelName};
use std::sync::Arc;

/// Channel name the managed runtime uses for package metadata.
pub const DEFAULT_CHANNEL_NAME: &str = "com.app.finity/package_info";

/// Host-side bridge configuration.
///
/// Use [`BridgeConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct BridgeConfig {
    /// Channel the managed runtime addresses; must match exactly
    pub channel_name: ChannelName,

    /// Display name reported as `appName`
    pub app_name: String,

    /// Installed package metadata source (required)
    pub package_manager: Arc<dyn PackageManager>,

    /// Additional capabilities registered next to `getPackageInfo`
    pub capabilities: Vec<(String, Arc<dyn CapabilityHandler>)>,
}

impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("channel_name", &self.channel_name)
            .field("app_name", &self.app_name)
            .field("package_manager", &"PackageManager { ... }")
            .field(
                "capabilities",
                &self
                    .capabilities
                    .iter()
                    .map(|(method, _)| method.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl BridgeConfig {
    /// Creates a new builder for constructing a `BridgeConfig`.
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Application name is not blank
    /// - Extra capability names are non-empty and unique
    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(Error::Config("Application name cannot be empty".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for (method, _) in &self.capabilities {
            if method.is_empty() {
                return Err(Error::Config(
                    "Capability method name cannot be empty".to_string(),
                ));
            }
            if method == core_bridge::GET_PACKAGE_INFO || !seen.insert(method.as_str()) {
                return Err(Error::Config(format!(
                    "Capability '{}' is registered more than once",
                    method
                )));
            }
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn package_manager_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "PackageManager".to_string(),
        message: "PackageManager implementation is required for package metadata. \
                 Desktop: enable the 'desktop-shims' feature and set a build version. \
                 Mobile: inject the platform package manager (PackageManager/Bundle)."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_package_manager(
    channel_name: &ChannelName,
    build_version: Option<&str>,
    build_number: Option<i64>,
) -> Result<Arc<dyn PackageManager>> {
    use bridge_desktop::BuildPackageManager;

    let Some(version) = build_version else {
        return Err(Error::CapabilityMissing {
            capability: "PackageManager".to_string(),
            message: "No PackageManager provided and no build version set for the desktop \
                     default. Call build_version(env!(\"CARGO_PKG_VERSION\")) or inject a \
                     PackageManager."
                .to_string(),
        });
    };

    // Channel names are namespaced by the application's package identifier.
    let package_name = channel_name
        .as_str()
        .split_once('/')
        .map(|(domain, _)| domain)
        .unwrap_or_default();

    let pm = match build_number {
        Some(code) => BuildPackageManager::from_cargo(package_name, version, code),
        None => BuildPackageManager::from_semver(package_name, version)
            .map_err(|e| Error::Config(format!("Invalid build version: {}", e)))?,
    };
    let pm: Arc<dyn PackageManager> = Arc::new(pm);
    Ok(pm)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_package_manager(
    _channel_name: &ChannelName,
    _build_version: Option<&str>,
    _build_number: Option<i64>,
) -> Result<Arc<dyn PackageManager>> {
    Err(package_manager_missing_error())
}

/// Builder for constructing [`BridgeConfig`] instances.
#[derive(Default)]
pub struct BridgeConfigBuilder {
    channel_name: Option<String>,
    app_name: Option<String>,
    package_manager: Option<Arc<dyn PackageManager>>,
    build_version: Option<String>,
    build_number: Option<i64>,
    capabilities: Vec<(String, Arc<dyn CapabilityHandler>)>,
}

impl BridgeConfigBuilder {
    /// Sets the channel name (default: [`DEFAULT_CHANNEL_NAME`]).
    pub fn channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = Some(name.into());
        self
    }

    /// Sets the application display name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Sets the package manager.
    pub fn package_manager(mut self, pm: Arc<dyn PackageManager>) -> Self {
        self.package_manager = Some(pm);
        self
    }

    /// Sets the version used by the desktop default package manager.
    pub fn build_version(mut self, version: impl Into<String>) -> Self {
        self.build_version = Some(version.into());
        self
    }

    /// Sets the build number reported by the desktop default package manager.
    pub fn build_number(mut self, code: i64) -> Self {
        self.build_number = Some(code);
        self
    }

    /// Registers an additional capability on the same channel.
    pub fn capability(
        mut self,
        method: impl Into<String>,
        handler: Arc<dyn CapabilityHandler>,
    ) -> Self {
        self.capabilities.push((method.into(), handler));
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the application name is missing or the channel
    ///   name is malformed
    /// - `Error::CapabilityMissing` if no package manager is available
    pub fn build(self) -> Result<BridgeConfig> {
        let app_name = self.app_name.ok_or_else(|| {
            Error::Config("Application name is required (app_name)".to_string())
        })?;

        let channel_name = ChannelName::new(
            self.channel_name
                .unwrap_or_else(|| DEFAULT_CHANNEL_NAME.to_string()),
        )
        .map_err(|e| Error::Config(e.to_string()))?;

        let package_manager = match self.package_manager {
            Some(pm) => pm,
            None => provide_default_package_manager(
                &channel_name,
                self.build_version.as_deref(),
                self.build_number,
            )?,
        };

        let config = BridgeConfig {
            channel_name,
            app_name,
            package_manager,
            capabilities: self.capabilities,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_desktop::InstalledPackages;
    use bridge_traits::PackageInfo;
    use core_bridge::{CapabilityRequest, CapabilityResult, HandlerOutcome};

    fn packages() -> Arc<dyn PackageManager> {
        Arc::new(InstalledPackages::with_running(
            PackageInfo::new("com.app.finity", 1).with_version_name("1.0.1"),
        ))
    }

    fn ping(_request: &CapabilityRequest) -> HandlerOutcome {
        Ok(CapabilityResult::new())
    }

    #[test]
    fn test_builder_defaults_channel_name() {
        let config = BridgeConfig::builder()
            .app_name("Finity")
            .package_manager(packages())
            .build()
            .unwrap();

        assert_eq!(config.channel_name.as_str(), DEFAULT_CHANNEL_NAME);
        assert_eq!(config.app_name, "Finity");
        assert!(config.capabilities.is_empty());
    }

    #[test]
    fn test_missing_app_name() {
        let err = BridgeConfig::builder()
            .package_manager(packages())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_blank_app_name() {
        let err = BridgeConfig::builder()
            .app_name("   ")
            .package_manager(packages())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Application name cannot be empty"));
    }

    #[test]
    fn test_invalid_channel_name() {
        let err = BridgeConfig::builder()
            .app_name("Finity")
            .channel_name("package_info")
            .package_manager(packages())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("package_info")));
    }

    #[test]
    fn test_duplicate_capability_rejected() {
        let err = BridgeConfig::builder()
            .app_name("Finity")
            .package_manager(packages())
            .capability("ping", Arc::new(ping))
            .capability("ping", Arc::new(ping))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));

        let err = BridgeConfig::builder()
            .app_name("Finity")
            .package_manager(packages())
            .capability(core_bridge::GET_PACKAGE_INFO, Arc::new(ping))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_missing_package_manager() {
        let err = BridgeConfig::builder()
            .app_name("Finity")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CapabilityMissing { ref capability, .. } if capability == "PackageManager"
        ));
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_desktop_default_package_manager() {
        let config = BridgeConfig::builder()
            .app_name("Finity")
            .build_version("1.0.1")
            .build_number(1)
            .build()
            .unwrap();

        let pm = &config.package_manager;
        assert_eq!(pm.package_name(), "com.app.finity");
        let info = pm.package_info("com.app.finity").unwrap();
        assert_eq!(info.version_name.as_deref(), Some("1.0.1"));
        assert_eq!(info.version_code, 1);
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_desktop_default_derives_build_number() {
        let config = BridgeConfig::builder()
            .app_name("Finity")
            .build_version("1.0.1")
            .build()
            .unwrap();

        let info = config.package_manager.package_info("com.app.finity").unwrap();
        assert_eq!(info.version_code, 10_001);
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_desktop_default_rejects_oversized_version() {
        let err = BridgeConfig::builder()
            .app_name("Finity")
            .build_version("1000000000000000.0.0")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("Invalid build version")));
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_desktop_default_requires_build_version() {
        let err = BridgeConfig::builder().app_name("Finity").build().unwrap_err();
        assert!(matches!(err, Error::CapabilityMissing { .. }));
    }
}
