// SPDX-License-Identifier: MPL-2.0

//! Welcome Window
//!
//! Thin libcosmic layer over the rest of the crate: every user action maps to
//! one [`Message`], and `update` forwards it to the preference store, the
//! autostart marker, the page loader or the link registry.
//!
//! # Layout
//!
//! - **Home**: greeting, link sections, installer (live media only),
//!   language selector and autostart switch
//! - **Readme / Release / Involved**: scrollable documentation pages
//! - **About**: short description and version
//!
//! The message catalog is part of the model. Changing language replaces it and
//! reloads the pages in the new locale; nothing global is mutated.

use std::collections::HashMap;

use cosmic::iced::Length;
use cosmic::prelude::*;
use cosmic::widget;
use cosmic::{Application, Element};
use i18n_embed::fluent::FluentLanguageLoader;

use crate::autostart::Autostart;
use crate::fl;
use crate::i18n;
use crate::links::{Link, UrlRegistry};
use crate::pages::{Page, Pages};
use crate::paths::Paths;
use crate::preferences::{PreferenceStore, Preferences};
use crate::system::{self, SystemInfo};

/// Everything resolved in `main` before the window opens.
pub struct Flags {
    pub paths: Paths,
    pub store: PreferenceStore,
    /// Preferences with the effective locale already filled in.
    pub preferences: Preferences,
    pub autostart: Autostart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Page(Page),
    About,
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Section),
    SelectLanguage(usize),
    ToggleAutostart(bool),
    OpenLink(Link),
    LaunchInstaller,
    CloseRequested,
}

pub struct HelloApp {
    core: cosmic::app::Core,
    paths: Paths,
    store: PreferenceStore,
    preferences: Preferences,
    autostart: Autostart,
    urls: UrlRegistry,
    pages: Pages,
    system: SystemInfo,
    installer_available: bool,
    /// Catalog for `preferences.locale`.
    catalog: FluentLanguageLoader,
    /// Language tags offered in the selector, with their native names.
    locales: Vec<String>,
    locale_names: Vec<String>,
    page_texts: HashMap<Page, String>,
    section: Section,
}

impl HelloApp {
    fn locale(&self) -> &str {
        self.preferences
            .locale
            .as_deref()
            .unwrap_or(crate::locale::DEFAULT_LOCALE)
    }

    /// Switch every visible string to `locale`.
    fn apply_locale(&mut self, locale: &str) {
        self.catalog = i18n::catalog(locale);
        self.page_texts = Page::ALL
            .into_iter()
            .map(|page| (page, self.pages.load(page, locale)))
            .collect();
        self.set_header_title(fl!(self.catalog, "window-title"));
    }

    fn link_button(&self, link: Link) -> Element<'_, Message> {
        let label = match link {
            Link::Wiki => fl!(self.catalog, "wiki"),
            Link::Forums => fl!(self.catalog, "forums"),
            Link::Chat => fl!(self.catalog, "chat"),
            Link::Mailling => fl!(self.catalog, "mailling"),
            Link::Development => fl!(self.catalog, "development"),
            Link::Donate => fl!(self.catalog, "donate"),
            Link::Facebook => "Facebook".to_string(),
            Link::Twitter => "Twitter".to_string(),
            Link::Reddit => "Reddit".to_string(),
        };
        widget::button::standard(label)
            .on_press(Message::OpenLink(link))
            .into()
    }

    fn page_button(&self, page: Page) -> Element<'_, Message> {
        let label = match page {
            Page::Readme => fl!(self.catalog, "readme"),
            Page::Release => fl!(self.catalog, "release"),
            Page::Involved => fl!(self.catalog, "involved"),
        };
        widget::button::suggested(label)
            .on_press(Message::Navigate(Section::Page(page)))
            .into()
    }

    fn view_home(&self) -> Element<'_, Message> {
        let documentation = Link::DOCUMENTATION.into_iter().fold(
            widget::row()
                .spacing(8)
                .push(self.page_button(Page::Readme))
                .push(self.page_button(Page::Release)),
            |row, link| row.push(self.link_button(link)),
        );

        let support = Link::SUPPORT
            .into_iter()
            .fold(widget::row().spacing(8), |row, link| row.push(self.link_button(link)));

        let project = Link::PROJECT.into_iter().fold(
            widget::row().spacing(8).push(self.page_button(Page::Involved)),
            |row, link| row.push(self.link_button(link)),
        );

        let social = Link::SOCIAL
            .into_iter()
            .fold(widget::row().spacing(8), |row, link| row.push(self.link_button(link)));

        let selected = self.locales.iter().position(|tag| tag == self.locale());

        let mut content = widget::column()
            .spacing(12)
            .push(widget::text::title1(fl!(self.catalog, "welcome-title")))
            .push(widget::text::body(fl!(self.catalog, "welcome-label")))
            .push(widget::divider::horizontal::default())
            .push(widget::text::heading(fl!(self.catalog, "first-category")))
            .push(documentation)
            .push(widget::text::heading(fl!(self.catalog, "second-category")))
            .push(support)
            .push(widget::text::heading(fl!(self.catalog, "third-category")))
            .push(project);

        if self.installer_available {
            content = content
                .push(widget::divider::horizontal::default())
                .push(widget::text::heading(fl!(self.catalog, "install-label")))
                .push(
                    widget::button::suggested(fl!(self.catalog, "install"))
                        .on_press(Message::LaunchInstaller),
                );
        }

        content
            .push(widget::divider::horizontal::default())
            .push(widget::settings::item(
                fl!(self.catalog, "language-label"),
                widget::dropdown(&self.locale_names, selected, Message::SelectLanguage),
            ))
            .push(widget::settings::item(
                fl!(self.catalog, "autostart-label"),
                widget::toggler(self.preferences.autostart).on_toggle(Message::ToggleAutostart),
            ))
            .push(social)
            .into()
    }

    fn view_page(&self, page: Page) -> Element<'_, Message> {
        let text = self
            .page_texts
            .get(&page)
            .map(String::as_str)
            .unwrap_or(crate::pages::PAGE_UNAVAILABLE);

        widget::scrollable(widget::text::body(text).width(Length::Fill)).into()
    }

    fn view_about(&self) -> Element<'_, Message> {
        widget::column()
            .spacing(12)
            .push(widget::icon::from_name("manjaro-hello").size(64).icon())
            .push(widget::text::title3(fl!(self.catalog, "window-title")))
            .push(widget::text::body(fl!(self.catalog, "about-comments")))
            .push(widget::text::caption(fl!(
                self.catalog,
                "about-version",
                version = env!("CARGO_PKG_VERSION")
            )))
            .push(widget::text::caption(self.system.kernel.clone().unwrap_or_default()))
            .into()
    }
}

impl Application for HelloApp {
    type Executor = cosmic::executor::Default;

    type Flags = Flags;

    type Message = Message;

    const APP_ID: &'static str = "org.manjaro.Hello";

    fn core(&self) -> &cosmic::app::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::app::Core {
        &mut self.core
    }

    fn on_close_requested(&self, _id: cosmic::iced::window::Id) -> Option<Message> {
        Some(Message::CloseRequested)
    }

    fn init(core: cosmic::app::Core, flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let Flags {
            paths,
            store,
            preferences,
            autostart,
        } = flags;

        let locales: Vec<String> = i18n::available_locales().into_iter().collect();
        let locale_names = locales
            .iter()
            .map(|tag| i18n::catalog(tag).get("language-name"))
            .collect();

        let mut app = HelloApp {
            core,
            urls: UrlRegistry::load(&paths.urls_file()),
            pages: Pages::new(paths.pages_dir()),
            system: SystemInfo::detect(&paths),
            installer_available: system::installer_available(&paths),
            catalog: i18n::catalog(crate::locale::DEFAULT_LOCALE),
            locales,
            locale_names,
            page_texts: HashMap::new(),
            section: Section::Home,
            paths,
            store,
            preferences,
            autostart,
        };

        let locale = app.locale().to_string();
        app.apply_locale(&locale);

        (app, Task::none())
    }

    fn header_center(&self) -> Vec<Element<'_, Self::Message>> {
        vec![widget::text::body(self.system.subtitle()).into()]
    }

    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        let home = widget::button::icon(widget::icon::from_name("go-home-symbolic"))
            .on_press_maybe((self.section != Section::Home).then_some(Message::Navigate(Section::Home)));
        vec![
            widget::tooltip(
                home,
                widget::text::body(fl!(self.catalog, "home")),
                widget::tooltip::Position::Bottom,
            )
            .into(),
        ]
    }

    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        let about = widget::button::icon(widget::icon::from_name("help-about-symbolic"))
            .on_press(Message::Navigate(Section::About));
        vec![
            widget::tooltip(
                about,
                widget::text::body(fl!(self.catalog, "about")),
                widget::tooltip::Position::Bottom,
            )
            .into(),
        ]
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let content = match self.section {
            Section::Home => self.view_home(),
            Section::Page(page) => self.view_page(page),
            Section::About => self.view_about(),
        };

        widget::container(widget::scrollable(widget::container(content).padding(24)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::Navigate(section) => {
                self.section = section;
            }
            Message::SelectLanguage(index) => {
                let Some(locale) = self.locales.get(index).cloned() else {
                    return Task::none();
                };
                log::info!("Switching language to {locale}");
                self.preferences.locale = Some(locale.clone());
                self.apply_locale(&locale);
                self.store.save(&self.preferences);
            }
            Message::ToggleAutostart(enabled) => {
                self.preferences.autostart = self.autostart.apply(enabled);
                self.store.save(&self.preferences);
            }
            Message::OpenLink(link) => {
                self.urls.open(link);
            }
            Message::LaunchInstaller => {
                if let Err(err) = system::launch_installer(&self.paths.installer) {
                    log::error!("{err}");
                }
            }
            Message::CloseRequested => {
                self.store.save(&self.preferences);
                return cosmic::iced::window::get_latest().and_then(|id| cosmic::iced::window::close(id));
            }
        }
        Task::none()
    }
}
