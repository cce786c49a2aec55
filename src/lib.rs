//! Interaction layer for a static portfolio page.
//!
//! This crate is compiled to WebAssembly and attached to an already-rendered
//! page. It drives five independent behaviors: light/dark theme switching,
//! a pointer tilt effect on project cards, scroll-triggered reveal, a
//! floating contact popup, and a card carousel with equalized card heights.
//!
//! The behaviors live in a browser-independent core that reacts to typed
//! [`page::PageEvent`]s over an abstract [`dom::Element`] handle, so they are
//! tested natively against a fake DOM. The `browser` feature adds the
//! `web-sys` bindings that find elements, install listeners and forward events.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | Mounts all behaviors and routes [`page::PageEvent`]s |
//! | [`theme`] | Theme resolution, application and toggle |
//! | [`tilt`] | Tilt motion math and the width-gated tilt manager |
//! | [`reveal`] | Intersection-driven `show` marker |
//! | [`popup`] | Contact popup open/close |
//! | [`carousel`] | Slide layout, navigation and height equalization |
//! | [`config`] | Validated configuration records |
//! | [`dom`] | Element handle and host service traits |
//! | [`error`] | Configuration and storage errors |
//! | [`consts`] | Default class names, ids and tuning values |
//! | `browser` | `web-sys` bindings and the wasm entry point (feature `browser`) |

pub mod carousel;
pub mod config;
pub mod consts;
pub mod dom;
pub mod error;
pub mod page;
pub mod popup;
pub mod reveal;
pub mod theme;
pub mod tilt;

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(test)]
#[path = "fake_test.rs"]
mod fake;
