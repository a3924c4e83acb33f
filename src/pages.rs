// SPDX-License-Identifier: MPL-2.0

//! Documentation pages shown in the welcome window.
//!
//! Pages are plain text files under `<data>/pages/<locale>/<page>`. A page
//! missing in the requested locale falls back to the base language's copy,
//! then to a fixed placeholder.

use std::fs;
use std::path::PathBuf;

use crate::locale::DEFAULT_LOCALE;

/// Shown when a page exists in no locale at all.
pub const PAGE_UNAVAILABLE: &str = "Can't load page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Readme,
    Release,
    Involved,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Readme, Page::Release, Page::Involved];

    /// File name of the page inside a locale directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Page::Readme => "readme",
            Page::Release => "release",
            Page::Involved => "involved",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pages {
    root: PathBuf,
}

impl Pages {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Text of `page` in `locale`.
    pub fn load(&self, page: Page, locale: &str) -> String {
        let localized = self.root.join(locale).join(page.file_name());
        let path = if localized.is_file() {
            localized
        } else {
            log::debug!("{} missing, using {DEFAULT_LOCALE}", localized.display());
            self.root.join(DEFAULT_LOCALE).join(page.file_name())
        };

        match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("Can't load page {}: {err}", path.display());
                PAGE_UNAVAILABLE.to_string()
            }
        }
    }
}
