//! Host abstractions the components operate on.
//!
//! ARCHITECTURE
//! ============
//! Components never touch `web-sys` directly. They work against an
//! [`Element`] handle and a few narrow service traits, so the same logic runs
//! against real DOM nodes in the browser and against a fake DOM in unit tests.
//! Handles are cheap to clone and refer to the same underlying node, which is
//! how the DOM itself behaves.

use std::fmt;

use crate::error::StorageError;

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An element's bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }
}

/// A handle to one element of the rendered page.
///
/// Equality is node identity. Mutating methods take `&self` because the
/// handle is a reference to shared document state.
pub trait Element: Clone + PartialEq + fmt::Debug {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    /// Set an inline style property.
    fn set_style(&self, property: &str, value: &str);
    /// Remove an inline style property, falling back to stylesheet rules.
    fn clear_style(&self, property: &str);

    /// Rendered height in pixels, including any inline height.
    fn offset_height(&self) -> f64;
    /// Inner width in pixels.
    fn client_width(&self) -> f64;
}

/// Durable per-origin key-value storage.
pub trait PreferenceStore {
    /// Read a value. Unavailable storage reads as `None`.
    fn load(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if storage is unavailable or rejects the write.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The operating environment's ambient color-scheme signal.
pub trait ColorScheme {
    /// `Some(true)` if dark is preferred, `Some(false)` if not, `None` if unknown.
    fn prefers_dark(&self) -> Option<bool>;
}

/// One-shot deferred execution.
///
/// Deferred tasks are never cancelled; scheduling twice runs twice.
pub trait Scheduler {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// A preference store with nothing in it that refuses writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStorage;

impl PreferenceStore for NoStorage {
    fn load(&self, _key: &str) -> Option<String> {
        None
    }

    fn store(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// A color-scheme source that never reports a preference.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColorScheme;

impl ColorScheme for NoColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        None
    }
}
