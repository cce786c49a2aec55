//! `web-sys` bindings for the page controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only code that touches the real DOM. [`host`] implements the
//! core's element and service traits over `web-sys`, [`tilt`] is the DOM tilt
//! backend, and [`mount`] finds the page's elements, installs listeners and
//! owns them until [`mount::PageHandle`] is dropped.

pub mod host;
pub mod mount;
pub mod tilt;

pub use mount::{PageHandle, mount_page, start, unmount};
