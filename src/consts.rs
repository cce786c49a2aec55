//! Shared constants for the page controller: class names, element ids and
//! numeric defaults. Every value here is the default of a field in
//! [`crate::config::PageConfig`] and can be overridden by page configuration.

// ── Theme ───────────────────────────────────────────────────────

/// `localStorage` key holding the persisted theme marker class.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Body class applied while the light theme is active.
pub const LIGHT_THEME_CLASS: &str = "light-theme";

/// Body class applied while the dark theme is active.
pub const DARK_THEME_CLASS: &str = "dark-theme";

/// Id of the theme toggle control.
pub const THEME_TOGGLE_ID: &str = "theme-toggle";

/// Media query for the ambient color-scheme signal.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// ── Tilt ────────────────────────────────────────────────────────

/// Tilt is active only for viewport widths strictly above this, in CSS pixels.
pub const TILT_BREAKPOINT_PX: f64 = 992.0;

/// Selector for cards that receive the tilt effect.
pub const PROJECT_CARD_SELECTOR: &str = ".project-card";

/// Default maximum tilt rotation in degrees.
pub const TILT_MAX_DEG: f64 = 15.0;

/// Default enter/leave transition duration in milliseconds.
pub const TILT_SPEED_MS: u32 = 400;

/// Default CSS perspective distance in pixels.
pub const TILT_PERSPECTIVE_PX: f64 = 1000.0;

/// Default maximum glare opacity.
pub const TILT_MAX_GLARE: f64 = 0.5;

/// Default transition easing.
pub const TILT_EASING: &str = "cubic-bezier(.03,.98,.52,.99)";

/// Gyroscope angle range mapped onto the element, in degrees either side of level.
pub const GYROSCOPE_HALF_RANGE_DEG: f64 = 45.0;

/// Class of the glare wrapper injected into tilted cards.
pub const GLARE_WRAPPER_CLASS: &str = "js-tilt-glare";

/// Class of the glare gradient layer inside the wrapper.
pub const GLARE_INNER_CLASS: &str = "js-tilt-glare-inner";

// ── Scroll reveal ───────────────────────────────────────────────

/// Marker class on elements that take part in the reveal animation.
pub const HIDDEN_CLASS: &str = "hidden";

/// Marker class applied while a reveal element intersects the viewport.
pub const SHOW_CLASS: &str = "show";

// ── Popup ───────────────────────────────────────────────────────

/// Id of the floating button that opens the contact popup.
pub const POPUP_TRIGGER_ID: &str = "whatsapp-fab";

/// Id of the popup's outer backdrop element.
pub const POPUP_MODAL_ID: &str = "whatsapp-modal";

/// Id of the popup close button.
pub const POPUP_CLOSE_ID: &str = "whatsapp-modal-close";

/// Marker class present while the popup is open.
pub const POPUP_ACTIVE_CLASS: &str = "modal--active";

// ── Carousel ────────────────────────────────────────────────────

/// Selector for the carousel root.
pub const CAROUSEL_ROOT_SELECTOR: &str = ".swiper";

/// Selector for the sliding track inside the root.
pub const CAROUSEL_TRACK_SELECTOR: &str = ".swiper-wrapper";

/// Selector for individual slides inside the track.
pub const CAROUSEL_SLIDE_SELECTOR: &str = ".swiper-slide";

/// Selector for the previous-slide control.
pub const CAROUSEL_PREV_SELECTOR: &str = ".swiper-button-prev";

/// Selector for the next-slide control.
pub const CAROUSEL_NEXT_SELECTOR: &str = ".swiper-button-next";

/// Fixed spacing between adjacent slides, in pixels.
pub const CAROUSEL_SPACE_BETWEEN_PX: f64 = 30.0;

/// Delay before card heights are re-equalized after a layout event.
pub const EQUALIZE_DELAY_MS: u32 = 100;

/// Slide transition duration in milliseconds.
pub const CAROUSEL_TRANSITION_MS: u32 = 300;

// ── Page ────────────────────────────────────────────────────────

/// Id of the optional `<script type="application/json">` holding page configuration.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";
