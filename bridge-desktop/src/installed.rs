//! In-memory installed package database

use bridge_traits::{
    error::{BridgeError, Result},
    package::{PackageInfo, PackageManager},
};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// Package manager backed by an in-memory install table
///
/// Models the host's package database for a desktop shell:
/// - One record per package identifier
/// - Installing over an existing package replaces it (upgrade)
/// - Every lookup reads the live table
pub struct InstalledPackages {
    running: String,
    packages: RwLock<HashMap<String, PackageInfo>>,
}

impl InstalledPackages {
    /// Create an empty table for the given running package
    pub fn new(running: impl Into<String>) -> Self {
        Self {
            running: running.into(),
            packages: RwLock::new(HashMap::new()),
        }
    }

    /// Create a table with the running package already installed
    pub fn with_running(info: PackageInfo) -> Self {
        let packages = Self::new(info.package_name.clone());
        packages.install(info);
        packages
    }

    /// Install or upgrade a package, returning the record it replaced
    pub fn install(&self, info: PackageInfo) -> Option<PackageInfo> {
        debug!(
            package = %info.package_name,
            version_code = info.version_code,
            "Installed package"
        );
        self.packages
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(info.package_name.clone(), info)
    }

    /// Remove a package, returning its record if it was installed
    pub fn uninstall(&self, package_name: &str) -> Option<PackageInfo> {
        debug!(package = package_name, "Uninstalled package");
        self.packages
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(package_name)
    }

    /// Installed package identifiers, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .packages
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl PackageManager for InstalledPackages {
    fn package_name(&self) -> String {
        self.running.clone()
    }

    fn package_info(&self, package_name: &str) -> Result<PackageInfo> {
        self.packages
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(package_name)
            .cloned()
            .ok_or_else(|| BridgeError::PackageNotFound(package_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finity(code: i64, name: &str) -> PackageInfo {
        PackageInfo::new("com.app.finity", code).with_version_name(name)
    }

    #[test]
    fn test_running_package_lookup() {
        let packages = InstalledPackages::with_running(finity(1, "1.0.1"));

        assert_eq!(packages.package_name(), "com.app.finity");
        let info = packages.package_info("com.app.finity").unwrap();
        assert_eq!(info.version_name.as_deref(), Some("1.0.1"));
    }

    #[test]
    fn test_upgrade_replaces_record() {
        let packages = InstalledPackages::with_running(finity(1, "1.0.1"));

        let previous = packages.install(finity(2, "1.1.0")).unwrap();
        assert_eq!(previous.version_code, 1);
        assert_eq!(packages.package_info("com.app.finity").unwrap().version_code, 2);
        assert_eq!(packages.list(), vec!["com.app.finity"]);
    }

    #[test]
    fn test_missing_package() {
        let packages = InstalledPackages::new("com.app.finity");

        let err = packages.package_info("com.app.finity").unwrap_err();
        assert!(matches!(err, BridgeError::PackageNotFound(ref p) if p == "com.app.finity"));
    }

    #[test]
    fn test_uninstall() {
        let packages = InstalledPackages::with_running(finity(1, "1.0.1"));
        packages.install(PackageInfo::new("com.other", 5));

        assert!(packages.uninstall("com.other").is_some());
        assert!(packages.uninstall("com.other").is_none());
        assert_eq!(packages.list(), vec!["com.app.finity"]);
    }
}
