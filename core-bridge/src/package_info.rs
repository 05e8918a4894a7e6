//! `getPackageInfo` capability.
//!
//! Reports the running application's identity metadata. Version fields are
//! read from the host package manager on every call, so they always reflect
//! the currently installed build.

use std::sync::Arc;

use bridge_traits::package::PackageManager;
use tracing::{debug, warn};

use crate::error::PACKAGE_INFO_ERROR;
use crate::handler::{CapabilityHandler, HandlerOutcome};
use crate::types::{CapabilityError, CapabilityRequest, CapabilityResult};

/// Method name answered by [`PackageInfoHandler`].
pub const GET_PACKAGE_INFO: &str = "getPackageInfo";

pub const FIELD_APP_NAME: &str = "appName";
pub const FIELD_PACKAGE_NAME: &str = "packageName";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_BUILD_NUMBER: &str = "buildNumber";

const FAILURE_MESSAGE: &str = "Failed to get package info";

/// Answers `getPackageInfo` from a host [`PackageManager`].
///
/// Lookup failures become `PACKAGE_INFO_ERROR` with the host's error text as
/// detail. There are no retries.
pub struct PackageInfoHandler {
    app_name: String,
    package_manager: Arc<dyn PackageManager>,
}

impl PackageInfoHandler {
    pub fn new(app_name: impl Into<String>, package_manager: Arc<dyn PackageManager>) -> Self {
        Self {
            app_name: app_name.into(),
            package_manager,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    fn failure(detail: impl Into<String>) -> CapabilityError {
        CapabilityError::new(PACKAGE_INFO_ERROR, FAILURE_MESSAGE).with_detail(detail)
    }
}

impl CapabilityHandler for PackageInfoHandler {
    fn handle(&self, _request: &CapabilityRequest) -> HandlerOutcome {
        if self.app_name.is_empty() {
            warn!("No application name configured");
            return Err(Self::failure("No application name configured"));
        }

        let package_name = self.package_manager.package_name();
        if package_name.is_empty() {
            warn!("Host reported no running package name");
            return Err(Self::failure("No running package name reported by host"));
        }

        let info = self
            .package_manager
            .package_info(&package_name)
            .map_err(|err| {
                warn!(package = %package_name, error = %err, "Package lookup failed");
                Self::failure(err.to_string())
            })?;

        let version = match info.version_name {
            Some(version) if !version.is_empty() => version,
            _ => {
                warn!(package = %package_name, "Host reported no version name");
                return Err(Self::failure(format!(
                    "No version name reported for {}",
                    package_name
                )));
            }
        };

        debug!(
            package = %package_name,
            version = %version,
            build = info.version_code,
            "Resolved package info"
        );

        Ok(CapabilityResult::new()
            .with_field(FIELD_APP_NAME, self.app_name.as_str())
            .with_field(FIELD_PACKAGE_NAME, package_name)
            .with_field(FIELD_VERSION, version)
            .with_field(FIELD_BUILD_NUMBER, info.version_code.to_string()))
    }
}
