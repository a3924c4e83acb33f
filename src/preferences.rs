// SPDX-License-Identifier: MPL-2.0

//! Persistent User Preferences
//!
//! A tiny JSON record kept at `~/.config/manjaro-hello.json`:
//!
//! ```json
//! {"locale": "fr", "autostart": true}
//! ```
//!
//! # Failure Model
//!
//! The file is a convenience, not a source of truth the application depends
//! on. A missing, unreadable or malformed file loads as defaults, and a failed
//! write is logged while the in-memory record keeps driving the session.
//!
//! # Thread Safety
//!
//! Only the UI thread touches the store, and writes happen at most once per
//! user action, so the file is simply overwritten without locking.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::autostart::Autostart;
use crate::error::{Error, Result};
use crate::locale;

/// The persisted preferences record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Chosen language tag, `None` until the first startup resolves one.
    pub locale: Option<String>,
    /// Whether the application launches at session login.
    pub autostart: bool,
}

/// Reads and writes [`Preferences`] at a fixed path.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    /// Autostart marker consulted when no record exists yet.
    autostart_marker: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>, autostart_marker: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            autostart_marker: autostart_marker.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored record.
    ///
    /// Never fails: any I/O or parse problem yields a default record whose
    /// `autostart` reflects whether the autostart marker exists right now.
    pub fn load(&self) -> Preferences {
        match self.read() {
            Ok(preferences) => preferences,
            Err(err) => {
                if err.is_not_found() {
                    log::debug!("No preferences at {}, using defaults", self.path.display());
                } else {
                    log::warn!("Ignoring unreadable preferences: {err}");
                }
                self.defaults()
            }
        }
    }

    /// Overwrite the stored record. Failures are logged, never returned.
    pub fn save(&self, preferences: &Preferences) {
        match self.write(preferences) {
            Ok(()) => log::debug!("Saved preferences to {}", self.path.display()),
            Err(err) => log::error!("Failed to save preferences: {err}"),
        }
    }

    /// Load the stored record and settle it for this session, then persist it.
    ///
    /// The locale is resolved against the available catalogs and the system
    /// locale, so it is never `None` afterwards, and `autostart` is synced with
    /// the marker actually on disk.
    pub fn startup<F>(&self, autostart: &Autostart, has_catalog: F, system_locale: Option<&str>) -> Preferences
    where
        F: Fn(&str) -> bool,
    {
        let mut preferences = self.load();
        log::debug!("Loaded {preferences:?} from {}", self.path.display());

        let effective = locale::resolve(
            preferences.locale.as_deref(),
            has_catalog,
            system_locale,
            locale::DEFAULT_LOCALE,
        );
        log::info!(
            "Using locale {effective} (stored: {:?}, system: {system_locale:?})",
            preferences.locale
        );
        preferences.locale = Some(effective);

        let on_disk = autostart.is_enabled();
        if preferences.autostart != on_disk {
            log::debug!("Stored autostart {} disagrees with disk, using {on_disk}", preferences.autostart);
            preferences.autostart = on_disk;
        }

        self.save(&preferences);
        preferences
    }

    fn defaults(&self) -> Preferences {
        Preferences {
            locale: None,
            autostart: crate::autostart::marker_exists(&self.autostart_marker),
        }
    }

    fn read(&self) -> Result<Preferences> {
        let content = fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::json(&self.path, e))
    }

    fn write(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let json = serde_json::to_string(preferences).map_err(|e| Error::json(&self.path, e))?;
        fs::write(&self.path, json).map_err(|e| Error::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> PreferenceStore {
        PreferenceStore::new(
            dir.join("manjaro-hello.json"),
            dir.join("autostart").join("manjaro-hello.desktop"),
        )
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let preferences = store.load();
        assert_eq!(preferences.locale, None);
        assert!(!preferences.autostart);
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_file_reflects_autostart_marker() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let launcher = dir.path().join("manjaro-hello.desktop");
        fs::write(&launcher, "[Desktop Entry]\n").unwrap();
        fs::create_dir_all(dir.path().join("autostart")).unwrap();
        std::os::unix::fs::symlink(&launcher, dir.path().join("autostart/manjaro-hello.desktop"))
            .unwrap();

        let preferences = store.load();
        assert_eq!(preferences.locale, None);
        assert!(preferences.autostart);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let saved = Preferences {
            locale: Some("pt-BR".to_string()),
            autostart: true,
        };

        store.save(&saved);
        assert_eq!(store.load(), saved);
    }

    #[test]
    fn test_malformed_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), "{\"locale\": ").unwrap();

        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_partial_record_fills_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), r#"{"locale": "de"}"#).unwrap();

        let preferences = store.load();
        assert_eq!(preferences.locale.as_deref(), Some("de"));
        assert!(!preferences.autostart);
    }

    #[test]
    fn test_null_locale_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), r#"{"locale": null, "autostart": true}"#).unwrap();

        let preferences = store.load();
        assert_eq!(preferences.locale, None);
        assert!(preferences.autostart);
    }

    fn catalogs(tag: &str) -> bool {
        ["en", "fr", "pt-BR"].contains(&tag)
    }

    fn autostart_in(dir: &Path) -> Autostart {
        Autostart::new(
            dir.join("autostart").join("manjaro-hello.desktop"),
            dir.join("manjaro-hello.desktop"),
        )
    }

    #[test]
    fn test_startup_fills_locale_and_syncs_autostart() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), r#"{"locale": null, "autostart": true}"#).unwrap();

        let preferences = store.startup(&autostart_in(dir.path()), catalogs, None);
        let expected = Preferences {
            locale: Some("en".to_string()),
            autostart: false,
        };
        assert_eq!(preferences, expected);
        assert_eq!(store.load(), expected);
    }

    #[test]
    fn test_startup_replaces_locale_without_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), r#"{"locale": "xx", "autostart": false}"#).unwrap();

        let preferences = store.startup(&autostart_in(dir.path()), catalogs, Some("fr_CA.UTF-8"));
        assert_eq!(preferences.locale.as_deref(), Some("fr"));
        assert_eq!(store.load().locale.as_deref(), Some("fr"));
    }

    #[test]
    fn test_startup_keeps_available_locale() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), r#"{"locale": "pt-BR", "autostart": false}"#).unwrap();

        let preferences = store.startup(&autostart_in(dir.path()), catalogs, Some("fr_FR"));
        assert_eq!(preferences.locale.as_deref(), Some("pt-BR"));
    }

    #[cfg(unix)]
    #[test]
    fn test_startup_reports_marker_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let autostart = autostart_in(dir.path());
        fs::write(dir.path().join("manjaro-hello.desktop"), "[Desktop Entry]\n").unwrap();
        autostart.set(true).unwrap();
        fs::write(store.path(), r#"{"locale": "en", "autostart": false}"#).unwrap();

        let preferences = store.startup(&autostart, catalogs, None);
        assert!(preferences.autostart);
        assert!(store.load().autostart);
    }

    #[test]
    fn test_save_into_unwritable_location_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = PreferenceStore::new(blocker.join("prefs.json"), dir.path().join("marker"));

        store.save(&Preferences::default());
        assert_eq!(store.load(), Preferences::default());
    }
}
