// SPDX-License-Identifier: MPL-2.0

//! Autostart at Session Login
//!
//! Autostart is enabled by the mere presence of a symlink in
//! `~/.config/autostart/` pointing at the application's launcher descriptor.
//! Both directions are idempotent: asking for the current state touches
//! nothing.
//!
//! i3 does not read the XDG autostart directory, so when an i3 config exists
//! the literal launch line in it is commented or uncommented as well. See
//! [`toggle_launch_line`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Whether an autostart marker is present at `path`.
///
/// A dangling symlink still counts, since the session manager would try to
/// follow it.
pub fn marker_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

#[derive(Debug, Clone)]
pub struct Autostart {
    marker: PathBuf,
    launcher: PathBuf,
    /// Optional i3 config and the launch line toggled inside it.
    wm_config: Option<(PathBuf, String)>,
}

impl Autostart {
    pub fn new(marker: impl Into<PathBuf>, launcher: impl Into<PathBuf>) -> Self {
        Self {
            marker: marker.into(),
            launcher: launcher.into(),
            wm_config: None,
        }
    }

    /// Also keep `command` in `config` commented out while autostart is off.
    pub fn with_wm_config(mut self, config: impl Into<PathBuf>, command: impl Into<String>) -> Self {
        self.wm_config = Some((config.into(), command.into()));
        self
    }

    pub fn is_enabled(&self) -> bool {
        marker_exists(&self.marker)
    }

    /// Bring the filesystem to the desired state.
    ///
    /// Returns `Ok(true)` if the marker was created or removed, `Ok(false)` if
    /// it was already as requested.
    pub fn set(&self, enabled: bool) -> Result<bool> {
        let changed = match (enabled, self.is_enabled()) {
            (true, false) => {
                self.create_marker()?;
                true
            }
            (false, true) => {
                fs::remove_file(&self.marker).map_err(|e| Error::io(&self.marker, e))?;
                true
            }
            _ => false,
        };

        if let Some((config, command)) = &self.wm_config {
            if config.is_file() && toggle_launch_line(config, command, enabled)? {
                log::info!("Updated autostart line in {}", config.display());
            }
        }

        Ok(changed)
    }

    /// Like [`Autostart::set`], but failures are logged and swallowed.
    ///
    /// Returns the state actually on disk afterwards.
    pub fn apply(&self, enabled: bool) -> bool {
        match self.set(enabled) {
            Ok(true) => log::info!(
                "Autostart {}",
                if enabled { "enabled" } else { "disabled" }
            ),
            Ok(false) => log::debug!("Autostart already {enabled}"),
            Err(err) => log::error!("Failed to change autostart: {err}"),
        }
        self.is_enabled()
    }

    #[cfg(unix)]
    fn create_marker(&self) -> Result<()> {
        if let Some(parent) = self.marker.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::os::unix::fs::symlink(&self.launcher, &self.marker).map_err(|e| Error::io(&self.marker, e))
    }

    #[cfg(not(unix))]
    fn create_marker(&self) -> Result<()> {
        if let Some(parent) = self.marker.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::copy(&self.launcher, &self.marker)
            .map(|_| ())
            .map_err(|e| Error::io(&self.marker, e))
    }
}

/// Comment (`enabled == false`) or uncomment a literal command line in a
/// window-manager config.
///
/// This is plain substring replacement on the whole file, not a config
/// parser: every occurrence of `command` is affected, wherever it appears.
/// Any number of leading `#` directly before the command count as one
/// comment marker.
/// Returns whether the file content changed.
pub fn toggle_launch_line(config: &Path, command: &str, enabled: bool) -> Result<bool> {
    let content = fs::read_to_string(config).map_err(|e| Error::io(config, e))?;

    let commented = format!("#{command}");
    // Fully uncommenting first keeps repeated disables from stacking `##`.
    let mut uncommented = content.clone();
    while uncommented.contains(&commented) {
        uncommented = uncommented.replace(&commented, command);
    }
    let updated = if enabled {
        uncommented
    } else {
        uncommented.replace(command, &commented)
    };

    if updated == content {
        return Ok(false);
    }
    fs::write(config, updated).map_err(|e| Error::io(config, e))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "exec --no-startup-id manjaro-hello";

    fn fixture() -> (tempfile::TempDir, Autostart) {
        let dir = tempfile::tempdir().unwrap();
        let launcher = dir.path().join("manjaro-hello.desktop");
        fs::write(&launcher, "[Desktop Entry]\nExec=manjaro-hello\n").unwrap();
        let autostart = Autostart::new(
            dir.path().join("autostart").join("manjaro-hello.desktop"),
            launcher,
        );
        (dir, autostart)
    }

    #[test]
    fn test_enable_creates_marker() {
        let (_dir, autostart) = fixture();
        assert!(!autostart.is_enabled());

        assert!(autostart.set(true).unwrap());
        assert!(autostart.is_enabled());
    }

    #[test]
    fn test_enable_twice_is_idempotent() {
        let (_dir, autostart) = fixture();

        assert!(autostart.set(true).unwrap());
        assert!(!autostart.set(true).unwrap());
        assert!(autostart.is_enabled());
    }

    #[test]
    fn test_disable_twice_is_idempotent() {
        let (_dir, autostart) = fixture();
        autostart.set(true).unwrap();

        assert!(autostart.set(false).unwrap());
        assert!(!autostart.set(false).unwrap());
        assert!(!autostart.is_enabled());
    }

    #[cfg(unix)]
    #[test]
    fn test_marker_points_at_launcher() {
        let (dir, autostart) = fixture();
        autostart.set(true).unwrap();

        let target = fs::read_link(dir.path().join("autostart/manjaro-hello.desktop")).unwrap();
        assert_eq!(target, dir.path().join("manjaro-hello.desktop"));
    }

    #[test]
    fn test_apply_reports_disk_state_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // Marker parent is a regular file, so creation must fail.
        let blocker = dir.path().join("autostart");
        fs::write(&blocker, "").unwrap();
        let autostart = Autostart::new(blocker.join("manjaro-hello.desktop"), dir.path().join("x"));

        assert!(!autostart.apply(true));
    }

    #[test]
    fn test_wm_line_toggles() {
        let (dir, autostart) = fixture();
        let config = dir.path().join("config");
        fs::write(&config, format!("set $mod Mod4\n{LINE}\n")).unwrap();
        let autostart = autostart.with_wm_config(&config, LINE);

        autostart.set(false).unwrap();
        assert_eq!(
            fs::read_to_string(&config).unwrap(),
            format!("set $mod Mod4\n#{LINE}\n")
        );

        autostart.set(true).unwrap();
        assert_eq!(
            fs::read_to_string(&config).unwrap(),
            format!("set $mod Mod4\n{LINE}\n")
        );
    }

    #[test]
    fn test_wm_line_disable_twice_does_not_stack() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config");
        fs::write(&config, format!("{LINE}\n")).unwrap();

        assert!(toggle_launch_line(&config, LINE, false).unwrap());
        assert!(!toggle_launch_line(&config, LINE, false).unwrap());
        assert_eq!(fs::read_to_string(&config).unwrap(), format!("#{LINE}\n"));
    }

    #[test]
    fn test_wm_line_enable_strips_repeated_markers() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config");
        fs::write(&config, format!("##{LINE}\n")).unwrap();

        assert!(toggle_launch_line(&config, LINE, true).unwrap());
        assert_eq!(fs::read_to_string(&config).unwrap(), format!("{LINE}\n"));

        fs::write(&config, format!("###{LINE}\n")).unwrap();
        assert!(toggle_launch_line(&config, LINE, false).unwrap());
        assert_eq!(fs::read_to_string(&config).unwrap(), format!("#{LINE}\n"));
    }

    #[test]
    fn test_missing_wm_config_is_ignored() {
        let (dir, autostart) = fixture();
        let autostart = autostart.with_wm_config(dir.path().join("no-such-config"), LINE);

        assert!(autostart.set(true).unwrap());
    }
}
