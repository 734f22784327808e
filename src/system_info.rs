//! Device and OS metadata.
//! Read once from the host; nothing here is cached or configurable.

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::output as out;
use crate::platform;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub os_name: String,
    pub os_version: String,
    pub device_model: String,
}

impl SystemInfo {
    /// Query the running host.
    pub fn current() -> Self {
        Self {
            os_name: platform::os_name().to_string(),
            os_version: platform::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            device_model: platform::device_model().unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device Model: {}", self.device_model)?;
        writeln!(f, "OS Name: {}", self.os_name)?;
        writeln!(f, "OS Version: {}", self.os_version)
    }
}

/// Print the host's device model, OS name and OS version to stdout.
pub fn system_information() -> SystemInfo {
    let sys = SystemInfo::current();
    out::print_field("Device Model", &sys.device_model);
    out::print_field("OS Name", &sys.os_name);
    out::print_field("OS Version", &sys.os_version);
    info!(
        device_model = %sys.device_model,
        os_name = %sys.os_name,
        os_version = %sys.os_version,
        "System information"
    );
    sys
}
