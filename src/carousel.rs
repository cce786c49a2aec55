//! Responsive looping card carousel.
//!
//! The carousel shows a window of `slides_per_view` consecutive slides, sized
//! from the root's width and shifted by translating the track. The number of
//! slides per view follows the viewport width through a breakpoint table.
//!
//! After mount, after every resize and after every slide change the cards
//! are re-equalized to the tallest card's natural height. That measurement is
//! deferred through the [`Scheduler`] because the track may still be
//! transitioning when the triggering event fires.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

use std::ops::Range;
use std::rc::Rc;

use serde::Deserialize;

use crate::consts::{CAROUSEL_SPACE_BETWEEN_PX, CAROUSEL_TRANSITION_MS, EQUALIZE_DELAY_MS};
use crate::dom::{Element, Scheduler};
use crate::error::ConfigError;

/// Slides per view from `min_width` upwards, until the next breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub min_width: f64,
    pub slides_per_view: u32,
}

impl Breakpoint {
    #[must_use]
    pub fn new(min_width: f64, slides_per_view: u32) -> Self {
        Self { min_width, slides_per_view }
    }
}

/// Carousel tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselSettings {
    /// Ascending, first entry at width 0.
    pub breakpoints: Vec<Breakpoint>,
    /// Gap between adjacent slides in pixels.
    pub space_between: f64,
    /// Wrap from the last position to the first and back.
    #[serde(rename = "loop")]
    pub looped: bool,
    pub equalize_delay_ms: u32,
    pub transition_ms: u32,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            breakpoints: vec![Breakpoint::new(0.0, 1), Breakpoint::new(768.0, 2), Breakpoint::new(1024.0, 3)],
            space_between: CAROUSEL_SPACE_BETWEEN_PX,
            looped: true,
            equalize_delay_ms: EQUALIZE_DELAY_MS,
            transition_ms: CAROUSEL_TRANSITION_MS,
        }
    }
}

impl CarouselSettings {
    /// Check the breakpoint table and spacing.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(first) = self.breakpoints.first() else {
            return Err(ConfigError::NoBreakpoints);
        };
        if first.min_width != 0.0 {
            return Err(ConfigError::FirstBreakpoint(first.min_width));
        }
        for pair in self.breakpoints.windows(2) {
            if pair[1].min_width <= pair[0].min_width || pair[1].min_width.is_nan() {
                return Err(ConfigError::UnorderedBreakpoints(pair[1].min_width));
            }
        }
        if let Some(bp) = self.breakpoints.iter().find(|bp| bp.slides_per_view == 0) {
            return Err(ConfigError::ZeroSlidesPerView(bp.min_width));
        }
        if self.space_between < 0.0 || self.space_between.is_nan() {
            return Err(ConfigError::NegativeSpacing(self.space_between));
        }
        Ok(())
    }

    /// Slides per view at `viewport_width`.
    #[must_use]
    pub fn slides_per_view(&self, viewport_width: f64) -> usize {
        let count = self
            .breakpoints
            .iter()
            .take_while(|bp| bp.min_width <= viewport_width)
            .last()
            .or(self.breakpoints.first())
            .map_or(1, |bp| bp.slides_per_view);
        usize::try_from(count.max(1)).unwrap_or(1)
    }
}

/// Slide size and track offset for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    pub slide_width: f64,
    /// Horizontal track translation in pixels; zero or negative.
    pub offset: f64,
}

/// Lifecycle points after which card heights are re-equalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    Init,
    Resize,
    SlideChange,
}

/// The carousel's elements as found on the page.
#[derive(Debug, Clone)]
pub struct CarouselElements<E> {
    pub root: E,
    pub track: Option<E>,
    pub slides: Vec<E>,
    pub cards: Vec<E>,
    pub prev: Option<E>,
    pub next: Option<E>,
}

pub struct Carousel<E> {
    elements: CarouselElements<E>,
    settings: CarouselSettings,
    scheduler: Rc<dyn Scheduler>,
    index: usize,
    per_view: usize,
}

impl<E: Element + 'static> Carousel<E> {
    /// Lay out for `viewport_width` and schedule the first equalization.
    pub fn mount(
        elements: CarouselElements<E>,
        settings: CarouselSettings,
        scheduler: Rc<dyn Scheduler>,
        viewport_width: f64,
    ) -> Self {
        let per_view = settings.slides_per_view(viewport_width);
        let carousel = Self { elements, settings, scheduler, index: 0, per_view };
        carousel.render(false);
        carousel.emit(CarouselEvent::Init);
        carousel
    }

    /// Number of distinct window positions.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.elements.slides.len().saturating_sub(self.per_view) + 1
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn slides_per_view(&self) -> usize {
        self.per_view
    }

    /// Indices of the slides currently in view.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.index + self.per_view).min(self.elements.slides.len());
        self.index..end
    }

    /// Advance one position. Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        let positions = self.position_count();
        let target = if self.index + 1 < positions {
            self.index + 1
        } else if self.settings.looped {
            0
        } else {
            self.index
        };
        self.slide_to(target)
    }

    /// Go back one position. Returns whether the index changed.
    pub fn prev(&mut self) -> bool {
        let target = if self.index > 0 {
            self.index - 1
        } else if self.settings.looped {
            self.position_count() - 1
        } else {
            self.index
        };
        self.slide_to(target)
    }

    /// Jump to `index`, clamped to the last position.
    pub fn slide_to(&mut self, index: usize) -> bool {
        let target = index.min(self.position_count() - 1);
        if target == self.index {
            return false;
        }
        self.index = target;
        self.render(true);
        self.emit(CarouselEvent::SlideChange);
        true
    }

    /// Re-evaluate slides per view and re-lay out.
    pub fn on_resize(&mut self, viewport_width: f64) {
        self.per_view = self.settings.slides_per_view(viewport_width);
        self.index = self.index.min(self.position_count() - 1);
        self.render(false);
        self.emit(CarouselEvent::Resize);
    }

    /// Slide width and track offset for a root of `container_width` pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn layout(&self, container_width: f64) -> TrackLayout {
        let per_view = self.per_view as f64;
        let gaps = self.settings.space_between * (per_view - 1.0);
        let slide_width = ((container_width - gaps) / per_view).max(0.0);
        let offset = if self.index == 0 { 0.0 } else { -(self.index as f64) * (slide_width + self.settings.space_between) };
        TrackLayout { slide_width, offset }
    }

    #[must_use]
    pub fn elements(&self) -> &CarouselElements<E> {
        &self.elements
    }

    fn render(&self, animate: bool) {
        let layout = self.layout(self.elements.root.client_width());
        let width = format!("{}px", layout.slide_width);
        let gap = format!("{}px", self.settings.space_between);
        for slide in &self.elements.slides {
            slide.set_style("width", &width);
            slide.set_style("margin-right", &gap);
        }
        if let Some(track) = &self.elements.track {
            let duration = if animate { self.settings.transition_ms } else { 0 };
            track.set_style("transition-duration", &format!("{duration}ms"));
            track.set_style("transform", &format!("translate3d({}px, 0px, 0px)", layout.offset));
        }
    }

    fn emit(&self, event: CarouselEvent) {
        log::trace!("carousel {event:?} at index {}", self.index);
        let cards = self.elements.cards.clone();
        self.scheduler.defer(
            self.settings.equalize_delay_ms,
            Box::new(move || {
                equalize_heights(&cards);
            }),
        );
    }
}

/// Force every card to the tallest card's natural height.
///
/// Explicit heights are cleared first so the measurement reflects content,
/// not a previous equalization. Returns the applied height, or `None` when
/// there are no cards.
pub fn equalize_heights<E: Element>(cards: &[E]) -> Option<f64> {
    if cards.is_empty() {
        return None;
    }
    for card in cards {
        card.clear_style("height");
    }
    let tallest = cards.iter().map(|card| card.offset_height()).fold(0.0, f64::max);
    let height = format!("{tallest}px");
    for card in cards {
        card.set_style("height", &height);
    }
    Some(tallest)
}
