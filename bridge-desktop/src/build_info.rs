//! Package metadata compiled into the host binary

use bridge_traits::{
    error::{BridgeError, Result},
    package::{PackageInfo, PackageManager},
};

/// Package manager reporting the host binary's own build metadata
///
/// Desktop binaries are not installed through a package database, so the
/// version is whatever the binary was built with. Construct it from the
/// embedding crate's Cargo metadata and the release's build number:
///
/// ```ignore
/// let pm = BuildPackageManager::from_cargo(
///     "com.app.finity",
///     env!("CARGO_PKG_VERSION"),
///     1,
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BuildPackageManager {
    info: PackageInfo,
}

impl BuildPackageManager {
    pub fn new(info: PackageInfo) -> Self {
        Self { info }
    }

    /// Report `version` together with an explicit build number.
    pub fn from_cargo(
        package_name: impl Into<String>,
        version: impl Into<String>,
        version_code: i64,
    ) -> Self {
        Self::new(PackageInfo::new(package_name, version_code).with_version_name(version))
    }

    /// Report `version` with a build number derived from it.
    ///
    /// Fallback for builds that carry no separate build number.
    /// `major.minor.patch` maps to `major * 10_000 + minor * 100 + patch`;
    /// pre-release and build suffixes are ignored.
    pub fn from_semver(package_name: impl Into<String>, version: &str) -> Result<Self> {
        let version_code = version_code(version)?;
        Ok(Self::from_cargo(package_name, version, version_code))
    }
}

fn version_code(version: &str) -> Result<i64> {
    let invalid = |reason: &str| {
        BridgeError::OperationFailed(format!("Invalid version '{}': {}", version, reason))
    };

    let core = version
        .split(|c| c == '-' || c == '+')
        .next()
        .unwrap_or_default();

    let parts = core
        .split('.')
        .map(|part| part.parse::<i64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| invalid(&e.to_string()))?;

    match parts.as_slice() {
        [major, minor, patch] if *minor < 100 && *patch < 100 => major
            .checked_mul(10_000)
            .and_then(|code| code.checked_add(minor * 100 + patch))
            .ok_or_else(|| invalid("build number out of range")),
        _ => Err(invalid(
            "expected major.minor.patch with minor/patch below 100",
        )),
    }
}

impl PackageManager for BuildPackageManager {
    fn package_name(&self) -> String {
        self.info.package_name.clone()
    }

    fn package_info(&self, package_name: &str) -> Result<PackageInfo> {
        if package_name != self.info.package_name {
            return Err(BridgeError::PackageNotFound(package_name.to_string()));
        }
        Ok(self.info.clone())
    }
}
