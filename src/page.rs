//! The page controller: all five behaviors behind one event entry point.
//!
//! ARCHITECTURE
//! ============
//! `Page` is the browser-independent core. The host collects elements into
//! [`PageElements`], provides [`Services`], and forwards every browser event
//! as a [`PageEvent`]. Each behavior is mounted independently; one whose
//! markup is missing is left unmounted and never affects the others.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::rc::Rc;

use crate::carousel::{Carousel, CarouselElements};
use crate::config::PageConfig;
use crate::dom::{ColorScheme, Element, PreferenceStore, Scheduler};
use crate::popup::{PopupController, PopupElements};
use crate::reveal::{Intersection, RevealObserver};
use crate::theme::{Theme, ThemeController};
use crate::tilt::{TiltBackend, TiltManager};

/// Elements the page binds to. Everything is optional.
#[derive(Debug, Clone)]
pub struct PageElements<E> {
    /// Carries the theme marker class.
    pub body: Option<E>,
    pub theme_toggle: Option<E>,
    pub project_cards: Vec<E>,
    /// Candidates for scroll reveal; only those marked hidden are observed.
    pub reveal_targets: Vec<E>,
    pub popup: PopupElements<E>,
    pub carousel: Option<CarouselElements<E>>,
}

impl<E> Default for PageElements<E> {
    fn default() -> Self {
        Self {
            body: None,
            theme_toggle: None,
            project_cards: Vec::new(),
            reveal_targets: Vec::new(),
            popup: PopupElements::default(),
            carousel: None,
        }
    }
}

/// Host services the behaviors depend on.
pub struct Services<E> {
    pub store: Box<dyn PreferenceStore>,
    pub color_scheme: Box<dyn ColorScheme>,
    pub tilt: Box<dyn TiltBackend<E>>,
    pub scheduler: Rc<dyn Scheduler>,
}

/// Everything the page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<E> {
    /// The viewport was resized to this width in CSS pixels.
    Resize { viewport_width: f64 },
    ThemeToggleClick,
    PopupTriggerClick,
    PopupCloseClick,
    /// A click reached the popup modal; `target` is where it landed.
    PopupModalClick { target: E },
    Intersections(Vec<Intersection<E>>),
    CarouselPrevClick,
    CarouselNextClick,
}

pub struct Page<E> {
    theme: Option<ThemeController<E>>,
    theme_toggle: Option<E>,
    tilt: TiltManager<E>,
    reveal: RevealObserver<E>,
    popup: Option<PopupController<E>>,
    carousel: Option<Carousel<E>>,
}

impl<E: Element + 'static> Page<E> {
    /// Mount every behavior whose markup is present.
    pub fn mount(config: PageConfig, elements: PageElements<E>, services: Services<E>, viewport_width: f64) -> Self {
        let Services { store, color_scheme, tilt: tilt_backend, scheduler } = services;

        let theme =
            elements.body.map(|body| ThemeController::mount(body, config.theme, store, color_scheme.as_ref()));
        let tilt = TiltManager::mount(elements.project_cards, config.tilt, tilt_backend, viewport_width);
        let reveal = RevealObserver::mount(elements.reveal_targets, config.reveal);
        let popup = PopupController::mount(elements.popup, config.popup);
        let carousel = elements
            .carousel
            .map(|els| Carousel::mount(els, config.carousel.settings, scheduler, viewport_width));

        let page = Self { theme, theme_toggle: elements.theme_toggle, tilt, reveal, popup, carousel };
        log::info!(
            "page mounted: theme={} tilt_cards={} reveal={} popup={} carousel={}",
            page.theme.is_some(),
            page.tilt.card_count(),
            page.reveal.targets().len(),
            page.popup.is_some(),
            page.carousel.is_some(),
        );
        page
    }

    /// Route one event to the behavior it concerns.
    pub fn dispatch(&mut self, event: PageEvent<E>) {
        match event {
            PageEvent::Resize { viewport_width } => {
                self.tilt.on_viewport_width(viewport_width);
                if let Some(carousel) = &mut self.carousel {
                    carousel.on_resize(viewport_width);
                }
            }
            PageEvent::ThemeToggleClick => {
                if let Some(theme) = &self.theme {
                    theme.toggle();
                }
            }
            PageEvent::PopupTriggerClick => {
                if let Some(popup) = &self.popup {
                    popup.on_trigger_click();
                }
            }
            PageEvent::PopupCloseClick => {
                if let Some(popup) = &self.popup {
                    popup.on_close_click();
                }
            }
            PageEvent::PopupModalClick { target } => {
                if let Some(popup) = &self.popup {
                    popup.on_modal_click(&target);
                }
            }
            PageEvent::Intersections(entries) => self.reveal.on_intersections(&entries),
            PageEvent::CarouselPrevClick => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.prev();
                }
            }
            PageEvent::CarouselNextClick => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.next();
                }
            }
        }
    }

    /// Detach every tilt instance. Listener removal belongs to the host.
    pub fn dispose(&mut self) {
        self.tilt.destroy_all();
    }

    // --- Queries ---

    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        self.theme.as_ref().map(ThemeController::current)
    }

    #[must_use]
    pub fn theme_toggle(&self) -> Option<&E> {
        self.theme_toggle.as_ref()
    }

    #[must_use]
    pub fn tilt(&self) -> &TiltManager<E> {
        &self.tilt
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealObserver<E> {
        &self.reveal
    }

    #[must_use]
    pub fn popup(&self) -> Option<&PopupController<E>> {
        self.popup.as_ref()
    }

    #[must_use]
    pub fn carousel(&self) -> Option<&Carousel<E>> {
        self.carousel.as_ref()
    }
}
