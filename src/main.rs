// SPDX-License-Identifier: MPL-2.0

//! Manjaro Hello - Welcome Screen
//!
//! Greets new users with release information, localized documentation pages,
//! links to the community and a switch to show the window at every login.
//!
//! # Startup
//!
//! 1. Load the stored preferences (defaults if there are none)
//! 2. Resolve the effective locale from the stored choice, the embedded
//!    catalogs and the desktop's preferred language
//! 3. Sync the autostart flag with the marker actually on disk
//! 4. Persist the result and open the window
//!
//! After that, a language picked in the window is taken as-is and saved
//! immediately; the resolver only runs at startup.

mod app;
mod autostart;
mod error;
mod i18n;
mod links;
mod locale;
mod pages;
mod paths;
mod preferences;
mod system;

use clap::Parser;

use crate::autostart::Autostart;
use crate::paths::{APP_NAME, Paths};
use crate::preferences::PreferenceStore;

const WINDOW_MIN_WIDTH: f32 = 640.0;
const WINDOW_MIN_HEIGHT: f32 = 480.0;

#[derive(Parser, Debug)]
#[command(name = APP_NAME, version, about = "Welcome screen for new Manjaro users")]
struct Cli {
    /// Use data files from the current directory instead of /usr/share
    #[arg(long)]
    dev: bool,
}

fn main() -> cosmic::iced::Result {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {APP_NAME} {}", env!("CARGO_PKG_VERSION"));

    let paths = Paths::new(cli.dev);
    if cli.dev {
        log::debug!("Development paths: {paths:?}");
    }

    let store = PreferenceStore::new(&paths.preferences_file, &paths.autostart_file);
    let autostart = Autostart::new(&paths.autostart_file, &paths.desktop_file)
        .with_wm_config(&paths.i3_config, format!("exec --no-startup-id {APP_NAME}"));

    let system_locale = locale::system_locale();
    let preferences = store.startup(&autostart, i18n::has_catalog, system_locale.as_deref());

    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(WINDOW_MIN_WIDTH)
            .min_height(WINDOW_MIN_HEIGHT),
    );

    let flags = app::Flags {
        paths,
        store,
        preferences,
        autostart,
    };

    cosmic::app::run::<app::HelloApp>(settings, flags)
}
