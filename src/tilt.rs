//! Pointer-driven 3D tilt for project cards.
//!
//! [`TiltSettings`] carries the tuning and the pure motion math: where the
//! pointer sits inside a card becomes a rotation around both axes plus a glare
//! angle and opacity. [`TiltManager`] decides which cards carry a live tilt
//! instance. Instances exist only while the viewport is wider than the
//! breakpoint; narrower viewports get every instance torn down so touch
//! scrolling is never intercepted.
//!
//! Installing listeners and writing styles is the job of a [`TiltBackend`].

#[cfg(test)]
#[path = "tilt_test.rs"]
mod tilt_test;

use std::cell::RefCell;

use serde::Deserialize;

use crate::config::TiltConfig;
use crate::consts::{GYROSCOPE_HALF_RANGE_DEG, TILT_EASING, TILT_MAX_DEG, TILT_MAX_GLARE, TILT_PERSPECTIVE_PX, TILT_SPEED_MS};
use crate::dom::{Element, Point, Rect};
use crate::error::ConfigError;

/// Tilt tuning parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TiltSettings {
    /// Maximum rotation in degrees around either axis.
    pub max: f64,
    /// Enter/leave transition duration in milliseconds.
    pub speed: u32,
    /// CSS perspective distance in pixels.
    pub perspective: f64,
    /// Uniform scale while hovered.
    pub scale: f64,
    /// CSS easing for enter/leave transitions.
    pub easing: String,
    /// Tilt away from the pointer instead of towards it.
    pub reverse: bool,
    /// Render a glare highlight that follows the pointer.
    pub glare: bool,
    /// Glare opacity at the bottom edge, in `[0, 1]`.
    #[serde(alias = "max-glare")]
    pub max_glare: f64,
    /// Drive the tilt from device orientation as well as the pointer.
    pub gyroscope: bool,
    pub gyroscope_min_angle_x: f64,
    pub gyroscope_max_angle_x: f64,
    pub gyroscope_min_angle_y: f64,
    pub gyroscope_max_angle_y: f64,
}

impl Default for TiltSettings {
    fn default() -> Self {
        Self {
            max: TILT_MAX_DEG,
            speed: TILT_SPEED_MS,
            perspective: TILT_PERSPECTIVE_PX,
            scale: 1.0,
            easing: TILT_EASING.to_owned(),
            reverse: false,
            glare: true,
            max_glare: TILT_MAX_GLARE,
            gyroscope: false,
            gyroscope_min_angle_x: -GYROSCOPE_HALF_RANGE_DEG,
            gyroscope_max_angle_x: GYROSCOPE_HALF_RANGE_DEG,
            gyroscope_min_angle_y: -GYROSCOPE_HALF_RANGE_DEG,
            gyroscope_max_angle_y: GYROSCOPE_HALF_RANGE_DEG,
        }
    }
}

/// One computed tilt pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltFrame {
    /// Rotation around the Y axis, in degrees.
    pub tilt_x: f64,
    /// Rotation around the X axis, in degrees.
    pub tilt_y: f64,
    /// Horizontal pointer position inside the element, 0–100.
    pub percentage_x: f64,
    /// Vertical pointer position inside the element, 0–100.
    pub percentage_y: f64,
    /// Glare direction in degrees, 0 pointing up.
    pub angle: f64,
}

impl TiltSettings {
    /// Check ranges.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max.is_nan() || self.max <= 0.0 || self.max > 90.0 {
            return Err(ConfigError::TiltMaxAngle(self.max));
        }
        if !(0.0..=1.0).contains(&self.max_glare) {
            return Err(ConfigError::TiltMaxGlare(self.max_glare));
        }
        if self.perspective <= 0.0 || self.perspective.is_nan() {
            return Err(ConfigError::TiltPerspective(self.perspective));
        }
        if self.scale <= 0.0 || self.scale.is_nan() {
            return Err(ConfigError::TiltScale(self.scale));
        }
        for (min, max) in [
            (self.gyroscope_min_angle_x, self.gyroscope_max_angle_x),
            (self.gyroscope_min_angle_y, self.gyroscope_max_angle_y),
        ] {
            if min >= max || min.is_nan() || max.is_nan() {
                return Err(ConfigError::GyroscopeRange { min, max });
            }
        }
        Ok(())
    }

    /// Pose for a pointer at `pointer` over an element at `bounds`.
    ///
    /// Pointers outside the element clamp to its nearest edge.
    #[must_use]
    pub fn frame(&self, pointer: Point, bounds: Rect) -> TiltFrame {
        let x = unit_fraction(pointer.x - bounds.left, bounds.width);
        let y = unit_fraction(pointer.y - bounds.top, bounds.height);
        let direction = if self.reverse { -1.0 } else { 1.0 };
        let center = bounds.center();

        TiltFrame {
            tilt_x: direction * (self.max - x * self.max * 2.0),
            tilt_y: direction * (y * self.max * 2.0 - self.max),
            percentage_x: x * 100.0,
            percentage_y: y * 100.0,
            angle: (pointer.x - center.x).atan2(-(pointer.y - center.y)).to_degrees(),
        }
    }

    /// Map a device orientation reading onto an equivalent pointer position.
    ///
    /// `gamma` (left/right) spans the configured X range across the width and
    /// `beta` (front/back) spans the Y range down the height.
    #[must_use]
    pub fn pointer_from_orientation(&self, beta: f64, gamma: f64, bounds: Rect) -> Point {
        let span_x = self.gyroscope_max_angle_x - self.gyroscope_min_angle_x;
        let span_y = self.gyroscope_max_angle_y - self.gyroscope_min_angle_y;
        let fx = (gamma - self.gyroscope_min_angle_x) / span_x;
        let fy = (beta - self.gyroscope_min_angle_y) / span_y;
        Point::new(bounds.left + fx * bounds.width, bounds.top + fy * bounds.height)
    }

    /// CSS transform for a pose.
    #[must_use]
    pub fn transform(&self, frame: &TiltFrame) -> String {
        format!(
            "perspective({}px) rotateX({:.2}deg) rotateY({:.2}deg) scale3d({s}, {s}, {s})",
            self.perspective,
            frame.tilt_y,
            frame.tilt_x,
            s = self.scale,
        )
    }

    /// CSS transform for the untilted resting pose.
    #[must_use]
    pub fn rest_transform(&self) -> String {
        format!("perspective({}px) rotateX(0deg) rotateY(0deg) scale3d(1, 1, 1)", self.perspective)
    }

    /// CSS `transition` value used while entering or leaving.
    #[must_use]
    pub fn transition(&self) -> String {
        format!("{}ms {}", self.speed, self.easing)
    }

    /// Glare opacity for a pose: transparent at the top, `max_glare` at the bottom.
    #[must_use]
    pub fn glare_opacity(&self, frame: &TiltFrame) -> f64 {
        frame.percentage_y * self.max_glare / 100.0
    }

    /// CSS transform for the glare layer of a pose.
    #[must_use]
    pub fn glare_transform(frame: &TiltFrame) -> String {
        format!("rotate({:.2}deg) translate(-50%, -50%)", frame.angle)
    }
}

/// Side length of the square glare gradient for an element of this size.
///
/// Twice the longer side, so the rotated gradient always covers the element.
#[must_use]
pub fn glare_diameter(width: f64, height: f64) -> f64 {
    width.max(height).max(0.0) * 2.0
}

/// The single pending end-of-transition timer of one tilted element.
///
/// `H` is a timer handle that cancels itself when dropped. Starting a new
/// transition replaces, and so cancels, the one still pending.
#[derive(Debug)]
pub struct TransitionTimer<H> {
    pending: RefCell<Option<H>>,
}

impl<H> Default for TransitionTimer<H> {
    fn default() -> Self {
        Self { pending: RefCell::new(None) }
    }
}

impl<H> TransitionTimer<H> {
    /// Track `handle`, cancelling any earlier timer.
    pub fn restart(&self, handle: H) {
        let previous = self.pending.replace(Some(handle));
        drop(previous);
    }

    /// Cancel the pending timer, if any.
    pub fn cancel(&self) {
        drop(self.pending.take());
    }
}

fn unit_fraction(offset: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.5;
    }
    (offset / extent).clamp(0.0, 1.0)
}

/// Installs and removes tilt instances on elements.
///
/// `detach` must leave the element as it was before `attach`: no listeners,
/// no inline transform, no glare layer.
pub trait TiltBackend<E> {
    fn attach(&mut self, element: &E, settings: &TiltSettings);
    fn detach(&mut self, element: &E);
}

struct TiltCard<E> {
    element: E,
    active: bool,
}

/// Keeps the set of tilted cards in line with the viewport width.
pub struct TiltManager<E> {
    cards: Vec<TiltCard<E>>,
    breakpoint: f64,
    settings: TiltSettings,
    backend: Box<dyn TiltBackend<E>>,
}

impl<E: Element> TiltManager<E> {
    /// Take ownership of `cards` and evaluate the initial viewport width.
    pub fn mount(cards: Vec<E>, config: TiltConfig, backend: Box<dyn TiltBackend<E>>, viewport_width: f64) -> Self {
        let mut unique: Vec<TiltCard<E>> = Vec::with_capacity(cards.len());
        for element in cards {
            if !unique.iter().any(|c| c.element == element) {
                unique.push(TiltCard { element, active: false });
            }
        }
        let mut manager = Self { cards: unique, breakpoint: config.breakpoint, settings: config.settings, backend };
        manager.on_viewport_width(viewport_width);
        manager
    }

    /// Whether tilt belongs on screen at `width`.
    #[must_use]
    pub fn enabled_at(&self, width: f64) -> bool {
        width > self.breakpoint
    }

    /// Converge the tilted set for a new viewport width.
    pub fn on_viewport_width(&mut self, width: f64) {
        let enable = self.enabled_at(width);
        let mut changed = 0usize;
        for card in &mut self.cards {
            if enable && !card.active {
                self.backend.attach(&card.element, &self.settings);
                card.active = true;
                changed += 1;
            } else if !enable && card.active {
                self.backend.detach(&card.element);
                card.active = false;
                changed += 1;
            }
        }
        if changed > 0 {
            log::debug!("tilt {} on {changed} cards at width {width}", if enable { "enabled" } else { "disabled" });
        }
    }

    /// Tear down every live instance.
    pub fn destroy_all(&mut self) {
        for card in &mut self.cards {
            if card.active {
                self.backend.detach(&card.element);
                card.active = false;
            }
        }
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.cards.iter().filter(|c| c.active).count()
    }

    #[must_use]
    pub fn is_active(&self, element: &E) -> bool {
        self.cards.iter().any(|c| c.active && c.element == *element)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn settings(&self) -> &TiltSettings {
        &self.settings
    }
}
