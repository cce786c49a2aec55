//! Page configuration.
//!
//! Every recognized option is an explicit field with a default. A page may
//! override any subset with a JSON document; unknown keys are rejected so a
//! typo does not silently fall back to a default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::carousel::CarouselSettings;
use crate::consts::{
    CAROUSEL_NEXT_SELECTOR, CAROUSEL_PREV_SELECTOR, CAROUSEL_ROOT_SELECTOR, CAROUSEL_SLIDE_SELECTOR,
    CAROUSEL_TRACK_SELECTOR, DARK_THEME_CLASS, HIDDEN_CLASS, LIGHT_THEME_CLASS, POPUP_ACTIVE_CLASS, POPUP_CLOSE_ID,
    POPUP_MODAL_ID, POPUP_TRIGGER_ID, PROJECT_CARD_SELECTOR, SHOW_CLASS, THEME_STORAGE_KEY, THEME_TOGGLE_ID,
    TILT_BREAKPOINT_PX,
};
use crate::error::ConfigError;
use crate::tilt::TiltSettings;

/// Full configuration for all five page behaviors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub theme: ThemeConfig,
    pub tilt: TiltConfig,
    pub reveal: RevealConfig,
    pub popup: PopupConfig,
    pub carousel: CarouselConfig,
}

impl PageConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown keys, or
    /// the first validation failure.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every nested record.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.theme.validate()?;
        self.tilt.settings.validate()?;
        self.carousel.settings.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub light_class: String,
    pub dark_class: String,
    pub toggle_id: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_owned(),
            light_class: LIGHT_THEME_CLASS.to_owned(),
            dark_class: DARK_THEME_CLASS.to_owned(),
            toggle_id: THEME_TOGGLE_ID.to_owned(),
        }
    }
}

impl ThemeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.light_class.is_empty() || self.dark_class.is_empty() || self.light_class == self.dark_class {
            return Err(ConfigError::ThemeClasses);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TiltConfig {
    pub card_selector: String,
    /// Tilt is enabled for viewport widths strictly above this.
    pub breakpoint: f64,
    pub settings: TiltSettings,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            card_selector: PROJECT_CARD_SELECTOR.to_owned(),
            breakpoint: TILT_BREAKPOINT_PX,
            settings: TiltSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub hidden_class: String,
    pub shown_class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { hidden_class: HIDDEN_CLASS.to_owned(), shown_class: SHOW_CLASS.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopupConfig {
    pub trigger_id: String,
    pub modal_id: String,
    pub close_id: String,
    pub active_class: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            trigger_id: POPUP_TRIGGER_ID.to_owned(),
            modal_id: POPUP_MODAL_ID.to_owned(),
            close_id: POPUP_CLOSE_ID.to_owned(),
            active_class: POPUP_ACTIVE_CLASS.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub root_selector: String,
    pub track_selector: String,
    pub slide_selector: String,
    pub card_selector: String,
    pub prev_selector: String,
    pub next_selector: String,
    pub settings: CarouselSettings,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            root_selector: CAROUSEL_ROOT_SELECTOR.to_owned(),
            track_selector: CAROUSEL_TRACK_SELECTOR.to_owned(),
            slide_selector: CAROUSEL_SLIDE_SELECTOR.to_owned(),
            card_selector: PROJECT_CARD_SELECTOR.to_owned(),
            prev_selector: CAROUSEL_PREV_SELECTOR.to_owned(),
            next_selector: CAROUSEL_NEXT_SELECTOR.to_owned(),
            settings: CarouselSettings::default(),
        }
    }
}
