// SPDX-License-Identifier: MPL-2.0

//! Effective Locale Selection
//!
//! Picks the one language the session runs in, from the stored preference,
//! the catalogs that exist and the operating system's default locale.
//!
//! The resolver never touches the filesystem itself: "a catalog exists" is a
//! predicate supplied by the caller (see [`crate::i18n::has_catalog`]).

use i18n_embed::DesktopLanguageRequester;

/// The base language. Its strings are the catalog fallback, so it is always
/// available.
pub const DEFAULT_LOCALE: &str = "en";

/// Choose the effective locale, in strict priority order:
///
/// 1. `preferred` if it is the default locale;
/// 2. `preferred` if a catalog exists for it;
/// 3. the system locale, hyphen-normalized (`fr_FR` → `fr-FR`), if a catalog
///    exists for it;
/// 4. the system locale's two-letter language subtag (`fr`), if a catalog
///    exists for it;
/// 5. `default`.
pub fn resolve<F>(preferred: Option<&str>, has_catalog: F, system: Option<&str>, default: &str) -> String
where
    F: Fn(&str) -> bool,
{
    if let Some(preferred) = preferred {
        if preferred == default || has_catalog(preferred) {
            return preferred.to_string();
        }
    }

    let Some(system) = system.map(strip_suffixes).filter(|s| !s.is_empty()) else {
        return default.to_string();
    };

    let normalized = system.replace('_', "-");
    if has_catalog(&normalized) || has_catalog(system) {
        return normalized;
    }

    if let Some(language) = language_subtag(system) {
        if has_catalog(&language) {
            return language;
        }
    }

    default.to_string()
}

/// The desktop session's preferred locale, with any encoding or modifier
/// suffix removed (`de_DE.UTF-8@euro` → `de_DE`).
pub fn system_locale() -> Option<String> {
    let requested = DesktopLanguageRequester::requested_languages();
    let raw = requested.first()?.to_string();
    let locale = strip_suffixes(&raw);
    (!locale.is_empty()).then(|| locale.to_string())
}

fn strip_suffixes(raw: &str) -> &str {
    raw.trim().split(['.', '@']).next().unwrap_or_default()
}

/// Two-letter primary language subtag, lowercased.
///
/// Locales whose primary subtag is not exactly two ASCII letters (`C`,
/// `POSIX`, `ast_ES`) yield `None`.
fn language_subtag(locale: &str) -> Option<String> {
    let primary = locale.split(['_', '-']).next()?;
    (primary.len() == 2 && primary.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| primary.to_ascii_lowercase())
}
