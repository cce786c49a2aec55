//! Core trait implementations over `web-sys`.
//!
//! DOM calls that can fail are logged and otherwise ignored: a rejected class
//! or style write leaves that one element unchanged and nothing else.

use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::consts::PREFERS_DARK_QUERY;
use crate::dom::{ColorScheme, Element, PreferenceStore, Rect, Scheduler};
use crate::error::StorageError;

impl Element for HtmlElement {
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.class_list().add_1(class) {
            log::warn!("add class {class} failed: {e:?}");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.class_list().remove_1(class) {
            log::warn!("remove class {class} failed: {e:?}");
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(e) = self.style().set_property(property, value) {
            log::warn!("set style {property} failed: {e:?}");
        }
    }

    fn clear_style(&self, property: &str) {
        if let Err(e) = self.style().remove_property(property) {
            log::warn!("clear style {property} failed: {e:?}");
        }
    }

    fn offset_height(&self) -> f64 {
        f64::from(HtmlElement::offset_height(self))
    }

    fn client_width(&self) -> f64 {
        f64::from(web_sys::Element::client_width(self))
    }
}

/// Bounding box of an element in viewport coordinates.
pub fn bounds(element: &HtmlElement) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Current viewport width in CSS pixels, 0 when unknown.
pub fn viewport_width(window: &web_sys::Window) -> f64 {
    match window.inner_width() {
        Ok(width) => width.as_f64().unwrap_or(0.0),
        Err(e) => {
            log::warn!("viewport width unavailable: {e:?}");
            0.0
        }
    }
}

/// Cast any JS value to an `HtmlElement`, if it is one.
pub fn as_html_element(value: impl Into<JsValue>) -> Option<HtmlElement> {
    let value: JsValue = value.into();
    match value.dyn_into::<HtmlElement>() {
        Ok(element) => Some(element),
        Err(_) => None,
    }
}

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// Whether `window.localStorage` can be reached at all.
    #[must_use]
    pub fn is_available() -> bool {
        Self::storage().is_some()
    }

    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::debug!("localStorage unavailable: {e:?}");
                None
            }
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        let storage = Self::storage()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("localStorage read of {key} failed: {e:?}");
                None
            }
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaColorScheme;

impl MediaColorScheme {
    /// Whether the browser answers the color-scheme media query.
    #[must_use]
    pub fn is_supported() -> bool {
        Self.prefers_dark().is_some()
    }
}

impl ColorScheme for MediaColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        let window = web_sys::window()?;
        match window.match_media(PREFERS_DARK_QUERY) {
            Ok(query) => query.map(|q| q.matches()),
            Err(e) => {
                log::debug!("matchMedia unavailable: {e:?}");
                None
            }
        }
    }
}

/// `setTimeout`-backed one-shot deferral.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}
