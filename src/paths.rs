// SPDX-License-Identifier: MPL-2.0

//! Filesystem locations used by the welcome screen.
//!
//! Two sets of roots exist: the *installed* layout under `/usr/share`, and a
//! *development* layout relative to the current directory (selected with
//! `--dev`) so the application can run straight from a source checkout.
//! Per-user locations always come from the user's config directory.

use std::path::{Path, PathBuf};

/// Application name, used for file names and the window-manager launch line.
pub const APP_NAME: &str = "manjaro-hello";

const INSTALLED_DATA_DIR: &str = "/usr/share/manjaro-hello/data";
const INSTALLED_DESKTOP_FILE: &str = "/usr/share/applications/manjaro-hello.desktop";
const LIVE_BOOT_MOUNTS: [&str; 2] = ["/run/miso/bootmnt/manjaro", "/bootmnt/manjaro"];
const INSTALLER_BINARY: &str = "/usr/bin/calamares";
const LSB_RELEASE: &str = "/etc/lsb-release";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root of `pages/` and `urls.json`.
    pub data_dir: PathBuf,
    /// Launcher descriptor the autostart marker points at.
    pub desktop_file: PathBuf,
    /// Persisted preferences record.
    pub preferences_file: PathBuf,
    /// Autostart marker (a symlink to `desktop_file`).
    pub autostart_file: PathBuf,
    /// i3 configuration, edited only if it exists.
    pub i3_config: PathBuf,
    /// Any of these existing means the session runs from live media.
    pub live_boot_mounts: Vec<PathBuf>,
    pub installer: PathBuf,
    pub lsb_release: PathBuf,
}

impl Paths {
    /// Resolve every path for the current user.
    ///
    /// `dev` swaps the system-wide data roots for ones relative to the current
    /// working directory.
    pub fn new(dev: bool) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
        let config = dirs::config_dir().unwrap_or_else(|| home.join(".config"));

        let (data_dir, desktop_file) = if dev {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            (
                cwd.join("data"),
                cwd.join(format!("{APP_NAME}.desktop")),
            )
        } else {
            (
                PathBuf::from(INSTALLED_DATA_DIR),
                PathBuf::from(INSTALLED_DESKTOP_FILE),
            )
        };

        Self::with_roots(data_dir, desktop_file, &config, &home)
    }

    /// Build the layout from explicit roots.
    pub fn with_roots(data_dir: PathBuf, desktop_file: PathBuf, config_dir: &Path, home_dir: &Path) -> Self {
        Self {
            data_dir,
            desktop_file,
            preferences_file: config_dir.join(format!("{APP_NAME}.json")),
            autostart_file: config_dir
                .join("autostart")
                .join(format!("{APP_NAME}.desktop")),
            i3_config: home_dir.join(".i3").join("config"),
            live_boot_mounts: LIVE_BOOT_MOUNTS.iter().map(PathBuf::from).collect(),
            installer: PathBuf::from(INSTALLER_BINARY),
            lsb_release: PathBuf::from(LSB_RELEASE),
        }
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.data_dir.join("pages")
    }

    pub fn urls_file(&self) -> PathBuf {
        self.data_dir.join("urls.json")
    }

    pub fn is_live_session(&self) -> bool {
        self.live_boot_mounts.iter().any(|mount| mount.exists())
    }
}
