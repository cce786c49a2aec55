//! Light/dark theme selection.
//!
//! The active theme is one of two marker classes on the body. The current
//! theme is always read back from the live class list, never cached, so a
//! class changed by something else on the page is respected on the next
//! toggle.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::config::ThemeConfig;
use crate::dom::{ColorScheme, Element, PreferenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Owns the body element and the preference store.
pub struct ThemeController<E> {
    root: E,
    config: ThemeConfig,
    store: Box<dyn PreferenceStore>,
}

impl<E: Element> ThemeController<E> {
    /// Resolve the initial theme and apply it to `root`.
    pub fn mount(root: E, config: ThemeConfig, store: Box<dyn PreferenceStore>, scheme: &dyn ColorScheme) -> Self {
        let controller = Self { root, config, store };
        let theme = controller.initial_theme(scheme);
        controller.apply(theme);
        controller
    }

    /// Stored preference first, then the ambient signal, then light.
    #[must_use]
    pub fn initial_theme(&self, scheme: &dyn ColorScheme) -> Theme {
        if let Some(theme) = self.store.load(&self.config.storage_key).and_then(|raw| self.parse(&raw)) {
            return theme;
        }
        match scheme.prefers_dark() {
            Some(true) => Theme::Dark,
            Some(false) | None => Theme::Light,
        }
    }

    /// Replace whichever marker class is present with `theme`'s and persist it.
    pub fn apply(&self, theme: Theme) {
        self.root.remove_class(&self.config.light_class);
        self.root.remove_class(&self.config.dark_class);
        let class = self.class_for(theme);
        self.root.add_class(class);
        if let Err(e) = self.store.store(&self.config.storage_key, class) {
            log::debug!("theme not persisted: {e}");
        }
    }

    /// The theme currently shown by the page.
    #[must_use]
    pub fn current(&self) -> Theme {
        if self.root.has_class(&self.config.light_class) {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    /// Flip to the other theme. Returns the theme now applied.
    pub fn toggle(&self) -> Theme {
        let next = self.current().opposite();
        self.apply(next);
        log::info!("theme switched to {next:?}");
        next
    }

    fn class_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.config.light_class,
            Theme::Dark => &self.config.dark_class,
        }
    }

    fn parse(&self, raw: &str) -> Option<Theme> {
        if raw == self.config.light_class {
            Some(Theme::Light)
        } else if raw == self.config.dark_class {
            Some(Theme::Dark)
        } else {
            None
        }
    }
}
