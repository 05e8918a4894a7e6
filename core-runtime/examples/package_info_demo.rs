//! Package info bridge demonstration
//!
//! Configures the host bridge on a desktop package table, then calls it from
//! the managed side the way an application would.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run -p core-runtime --example package_info_demo
//!
//! # JSON format
//! cargo run -p core-runtime --example package_info_demo -- json
//! ```

use bridge_desktop::InstalledPackages;
use bridge_traits::{ConsoleLogger, LogLevel, PackageInfo};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::{BridgeConfig, HostBridge};
use std::env;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let format = match env::args().nth(1).as_deref() {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        _ => LogFormat::default(),
    };

    init_logging(
        LoggingConfig::default()
            .with_format(format)
            .with_level(LogLevel::Debug)
            .with_logger_sink(Arc::new(ConsoleLogger {
                min_level: LogLevel::Warn,
            })),
    )?;

    let packages = Arc::new(InstalledPackages::with_running(
        PackageInfo::new("com.app.finity", 1).with_version_name("1.0.1"),
    ));

    let config = BridgeConfig::builder()
        .app_name("Finity")
        .package_manager(packages.clone())
        .build()?;
    let bridge = HostBridge::configure(config)?;
    let client = bridge.client();

    info!(response = ?client.invoke("getPackageInfo"), "Installed build");

    packages.install(PackageInfo::new("com.app.finity", 2).with_version_name("1.1.0"));
    info!(response = ?client.invoke("getPackageInfo"), "After upgrade");

    info!(response = ?client.invoke("unknownMethod"), "Unknown method");

    packages.uninstall("com.app.finity");
    info!(response = ?client.invoke("getPackageInfo"), "After uninstall");

    Ok(())
}
