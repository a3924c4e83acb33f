// SPDX-License-Identifier: MPL-2.0

//! Community links opened in the user's browser.
//!
//! URLs live in `<data>/urls.json`, a flat `{"name": "url"}` object, so they
//! can be updated without a rebuild. The set of names is fixed by [`Link`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    Wiki,
    Forums,
    Chat,
    Mailling,
    Development,
    Donate,
    Facebook,
    Twitter,
    Reddit,
}

impl Link {
    pub const DOCUMENTATION: [Link; 1] = [Link::Wiki];
    pub const SUPPORT: [Link; 3] = [Link::Forums, Link::Chat, Link::Mailling];
    pub const PROJECT: [Link; 2] = [Link::Development, Link::Donate];
    pub const SOCIAL: [Link; 3] = [Link::Facebook, Link::Twitter, Link::Reddit];

    /// Key of this link in `urls.json`.
    pub fn key(self) -> &'static str {
        match self {
            Link::Wiki => "wiki",
            Link::Forums => "forums",
            Link::Chat => "chat",
            Link::Mailling => "mailling",
            Link::Development => "development",
            Link::Donate => "donate",
            Link::Facebook => "facebook",
            Link::Twitter => "twitter",
            Link::Reddit => "reddit",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UrlRegistry {
    urls: HashMap<String, String>,
}

impl UrlRegistry {
    /// Read the registry from `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let urls = serde_json::from_str(&content).map_err(|e| Error::json(path, e))?;
        Ok(Self { urls })
    }

    /// Like [`UrlRegistry::from_file`], but an unreadable file yields an
    /// empty registry.
    pub fn load(path: &Path) -> Self {
        Self::from_file(path).unwrap_or_else(|err| {
            log::error!("Failed to load links: {err}");
            Self::default()
        })
    }

    pub fn url(&self, link: Link) -> Option<&str> {
        self.urls.get(link.key()).map(String::as_str)
    }

    /// Open `link` in a new browser tab. Failures are logged.
    pub fn open(&self, link: Link) {
        let Some(url) = self.url(link) else {
            log::error!("No URL registered for {:?}", link.key());
            return;
        };

        match open::that_detached(url).map_err(|source| Error::Browser {
            url: url.to_string(),
            source,
        }) {
            Ok(()) => log::info!("Opened {url}"),
            Err(err) => log::error!("{err}"),
        }
    }
}
