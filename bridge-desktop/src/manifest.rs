//! Package metadata read from an installed manifest file

use bridge_traits::{
    error::{BridgeError, Result},
    package::{PackageInfo, PackageManager},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Package manager that reads a JSON manifest on every lookup
///
/// The manifest is written by the installer next to the application:
///
/// ```json
/// { "packageName": "com.app.finity", "versionName": "1.0.1", "versionCode": 1 }
/// ```
///
/// The file is re-read per call, so replacing it during an upgrade is
/// picked up by the next query.
pub struct ManifestPackageManager {
    running: String,
    path: PathBuf,
}

impl ManifestPackageManager {
    pub fn new(running: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            running: running.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_manifest(&self) -> Result<PackageInfo> {
        let contents = std::fs::read(&self.path)?;
        let info: PackageInfo = serde_json::from_slice(&contents).map_err(|e| {
            BridgeError::OperationFailed(format!("Invalid package manifest: {}", e))
        })?;

        debug!(
            path = ?self.path,
            package = %info.package_name,
            "Read package manifest"
        );
        Ok(info)
    }
}

impl PackageManager for ManifestPackageManager {
    fn package_name(&self) -> String {
        self.running.clone()
    }

    fn package_info(&self, package_name: &str) -> Result<PackageInfo> {
        let info = self.read_manifest()?;
        if info.package_name != package_name {
            return Err(BridgeError::PackageNotFound(package_name.to_string()));
        }
        Ok(info)
    }
}
