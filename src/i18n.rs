// SPDX-License-Identifier: MPL-2.0

//! Message Catalogs
//!
//! Translations are Fluent files embedded at build time from `i18n/`:
//!
//! ```text
//! i18n/
//! ├── en/
//! │   └── manjaro_hello.ftl   # Base language, also the fallback
//! ├── fr/
//! │   └── manjaro_hello.ftl
//! └── pt-BR/
//!     └── manjaro_hello.ftl
//! ```
//!
//! There is no process-wide "current language". [`catalog`] builds a loader
//! for one explicit locale and the UI keeps it next to the rest of its state;
//! switching language means building a new one.
//!
//! # Usage
//!
//! ```rust
//! let catalog = i18n::catalog("fr");
//! let title = fl!(catalog, "welcome-title");
//! ```

use std::collections::BTreeSet;

use i18n_embed::{
    DefaultLocalizer, LanguageLoader, Localizer,
    fluent::{FluentLanguageLoader, fluent_language_loader},
    unic_langid::LanguageIdentifier,
};
use rust_embed::RustEmbed;

use crate::error::{Error, Result};

/// Embedded localization files from the `i18n/` directory.
#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Localizations;

/// Fluent domain, i.e. the catalog file stem inside each locale directory.
const DOMAIN: &str = "manjaro_hello";

fn catalog_file(tag: &str) -> String {
    format!("{tag}/{DOMAIN}.ftl")
}

/// Whether a catalog is embedded for exactly this language tag.
pub fn has_catalog(tag: &str) -> bool {
    !tag.is_empty() && Localizations::get(&catalog_file(tag)).is_some()
}

/// Every language tag that has an embedded catalog, sorted.
pub fn available_locales() -> BTreeSet<String> {
    Localizations::iter()
        .filter_map(|file| {
            let (tag, name) = file.split_once('/')?;
            (name == format!("{DOMAIN}.ftl")).then(|| tag.to_string())
        })
        .collect()
}

/// Build a message catalog for `locale`.
///
/// The base language is always loaded underneath, so a missing translation
/// or an unknown locale degrades to English strings instead of failing.
pub fn catalog(locale: &str) -> FluentLanguageLoader {
    let loader: FluentLanguageLoader = fluent_language_loader!();

    if let Err(why) = loader.load_fallback_language(&Localizations) {
        log::error!("error while loading fallback localizations: {why}");
    }

    if let Err(why) = select(&loader, locale) {
        log::warn!("falling back to base language: {why}");
    }

    loader
}

fn select(loader: &FluentLanguageLoader, locale: &str) -> Result<()> {
    let language: LanguageIdentifier = locale
        .parse()
        .map_err(|_| Error::InvalidLocale(locale.to_string()))?;

    DefaultLocalizer::new(loader, &Localizations)
        .select(&[language])
        .map(|selected| log::debug!("loaded localizations: {selected:?}"))
        .map_err(|_| Error::InvalidLocale(locale.to_string()))
}

/// Request a localized string by ID from an explicit catalog.
///
/// # Examples
///
/// ```rust
/// let text = fl!(catalog, "autostart-label");
/// let msg = fl!(catalog, "subtitle", codename = "Gellivara", release = "17.0");
/// ```
///
/// If the requested message ID is not found, the ID itself is returned.
#[macro_export]
macro_rules! fl {
    // Simple message lookup without arguments
    ($catalog:expr, $message_id:literal) => {{
        i18n_embed_fl::fl!($catalog, $message_id)
    }};

    // Message lookup with named arguments
    ($catalog:expr, $message_id:literal, $($args:expr),*) => {{
        i18n_embed_fl::fl!($catalog, $message_id, $($args), *)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_language_is_available() {
        assert!(has_catalog("en"));
        assert!(available_locales().contains("en"));
    }

    #[test]
    fn test_region_tags_use_hyphens() {
        assert!(has_catalog("pt-BR"));
        assert!(!has_catalog("pt_BR"));
    }

    #[test]
    fn test_unknown_locale_has_no_catalog() {
        assert!(!has_catalog("xx"));
        assert!(!has_catalog(""));
    }

    #[test]
    fn test_available_locales_have_catalogs() {
        for tag in available_locales() {
            assert!(has_catalog(&tag), "{tag} listed but not found");
        }
    }

    #[test]
    fn test_catalog_translates() {
        let english = catalog("en");
        let french = catalog("fr");
        assert_eq!(english.get("home"), "Home");
        assert_eq!(french.get("home"), "Accueil");
    }

    #[test]
    fn test_header_tooltips_are_translated() {
        for tag in available_locales() {
            let catalog = catalog(&tag);
            assert_ne!(catalog.get("home"), "home", "{tag}");
            assert_ne!(catalog.get("about"), "about", "{tag}");
        }
        assert_eq!(catalog("fr").get("about"), "À propos");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_english() {
        assert_eq!(catalog("xx").get("home"), "Home");
        assert_eq!(catalog("not a tag!").get("home"), "Home");
    }
}
