//! Package Metadata Abstraction
//!
//! Provides read access to the host's record of installed application
//! packages.

use serde::{Deserialize, Serialize};

use crate::{error::Result, platform::PlatformSendSync};

/// Metadata the host keeps about an installed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    /// Reverse-domain package identifier (e.g. `com.app.finity`)
    pub package_name: String,
    /// User-facing version string; hosts may omit it
    pub version_name: Option<String>,
    /// Monotonic build number
    pub version_code: i64,
}

impl PackageInfo {
    pub fn new(package_name: impl Into<String>, version_code: i64) -> Self {
        Self {
            package_name: package_name.into(),
            version_name: None,
            version_code,
        }
    }

    pub fn with_version_name(mut self, version_name: impl Into<String>) -> Self {
        self.version_name = Some(version_name.into());
        self
    }
}

/// Package manager trait
///
/// Answers questions about installed packages on behalf of the bridge:
/// - **Android**: `PackageManager.getPackageInfo`
/// - **iOS**: main bundle `Info.plist`
/// - **Desktop**: installed manifest or compiled-in build metadata
///
/// Lookups must hit the host's current state on every call. Implementations
/// must not cache results, so an upgraded install is visible immediately.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::package::PackageManager;
///
/// fn current_version(pm: &dyn PackageManager) -> Option<String> {
///     pm.package_info(&pm.package_name()).ok()?.version_name
/// }
/// ```
pub trait PackageManager: PlatformSendSync {
    /// Identifier of the package the bridge is running inside
    fn package_name(&self) -> String;

    /// Look up metadata for an installed package
    ///
    /// Returns [`BridgeError::PackageNotFound`](crate::BridgeError::PackageNotFound)
    /// when the host has no record of `package_name`.
    fn package_info(&self, package_name: &str) -> Result<PackageInfo>;
}
