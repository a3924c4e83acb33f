// SPDX-License-Identifier: MPL-2.0

//! Information about the running system shown in the window header, and the
//! installer launcher offered on live media.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use sysinfo::System;

use crate::error::{Error, Result};
use crate::paths::Paths;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfo {
    /// Release codename from lsb-release (e.g. "Gellivara").
    pub codename: Option<String>,
    /// Release number from lsb-release (e.g. "17.0").
    pub release: Option<String>,
    /// "64-bits" or "32-bits".
    pub arch: &'static str,
    pub kernel: Option<String>,
    /// Running from live install media.
    pub live: bool,
}

impl SystemInfo {
    pub fn detect(paths: &Paths) -> Self {
        let lsb = match fs::read_to_string(&paths.lsb_release) {
            Ok(content) => parse_lsb_release(&content),
            Err(err) => {
                log::warn!("{}", Error::io(&paths.lsb_release, err));
                HashMap::new()
            }
        };

        Self {
            codename: lsb.get("CODENAME").cloned(),
            release: lsb.get("RELEASE").cloned(),
            arch: arch_label(),
            kernel: System::kernel_version(),
            live: paths.is_live_session(),
        }
    }

    /// Header subtitle: `"<codename> <release> <arch>"`, or just the
    /// architecture when the release is unknown.
    pub fn subtitle(&self) -> String {
        match (&self.codename, &self.release) {
            (Some(codename), Some(release)) => format!("{codename} {release} {}", self.arch),
            _ => self.arch.to_string(),
        }
    }
}

fn arch_label() -> &'static str {
    if cfg!(target_pointer_width = "64") {
        "64-bits"
    } else {
        "32-bits"
    }
}

/// Parse `KEY=value` lines of `/etc/lsb-release`.
///
/// The `DISTRIB_` prefix and surrounding double quotes are stripped; empty
/// values are dropped.
pub fn parse_lsb_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| {
            let (key, value) = line.trim_end().split_once('=')?;
            let key = key.strip_prefix("DISTRIB_").unwrap_or(key);
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            (!value.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}

/// Whether the graphical installer can be offered.
pub fn installer_available(paths: &Paths) -> bool {
    paths.is_live_session() && paths.installer.is_file()
}

/// Start the installer with elevated privileges without waiting for it.
pub fn launch_installer(installer: &Path) -> Result<()> {
    let child = Command::new("pkexec")
        .arg(installer)
        .spawn()
        .map_err(|source| Error::Spawn {
            program: format!("pkexec {}", installer.display()),
            source,
        })?;
    log::info!("Installer started with PID {}", child.id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lsb_release() {
        let content = "DISTRIB_ID=ManjaroLinux\nDISTRIB_RELEASE=17.0\nDISTRIB_CODENAME=Gellivara\nDISTRIB_DESCRIPTION=\"Manjaro Linux\"\n";
        let lsb = parse_lsb_release(content);

        assert_eq!(lsb.get("ID").map(String::as_str), Some("ManjaroLinux"));
        assert_eq!(lsb.get("RELEASE").map(String::as_str), Some("17.0"));
        assert_eq!(lsb.get("CODENAME").map(String::as_str), Some("Gellivara"));
        assert_eq!(lsb.get("DESCRIPTION").map(String::as_str), Some("Manjaro Linux"));
    }

    #[test]
    fn test_parse_lsb_release_skips_noise() {
        let lsb = parse_lsb_release("# comment\nDISTRIB_CODENAME=\nNAME=\"\"\nOTHER=value\n");

        assert_eq!(lsb.len(), 1);
        assert_eq!(lsb.get("OTHER").map(String::as_str), Some("value"));
    }

    #[test]
    fn test_subtitle() {
        let mut info = SystemInfo {
            codename: Some("Gellivara".into()),
            release: Some("17.0".into()),
            arch: "64-bits",
            ..Default::default()
        };
        assert_eq!(info.subtitle(), "Gellivara 17.0 64-bits");

        info.release = None;
        assert_eq!(info.subtitle(), "64-bits");
    }
}
