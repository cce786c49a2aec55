//! Floating contact popup.
//!
//! The open/closed state is the presence of the active marker class on the
//! modal element. Every binding site is optional; a page without the popup
//! markup mounts nothing.

#[cfg(test)]
#[path = "popup_test.rs"]
mod popup_test;

use crate::config::PopupConfig;
use crate::dom::Element;

/// The popup's elements as found on the page.
#[derive(Debug, Clone)]
pub struct PopupElements<E> {
    pub trigger: Option<E>,
    pub modal: Option<E>,
    pub close: Option<E>,
}

impl<E> Default for PopupElements<E> {
    fn default() -> Self {
        Self { trigger: None, modal: None, close: None }
    }
}

pub struct PopupController<E> {
    modal: E,
    trigger: Option<E>,
    close: Option<E>,
    active_class: String,
}

impl<E: Element> PopupController<E> {
    /// Mount over the given elements. Returns `None` without a modal.
    pub fn mount(elements: PopupElements<E>, config: PopupConfig) -> Option<Self> {
        let Some(modal) = elements.modal else {
            log::debug!("popup markup absent; popup inert");
            return None;
        };
        Some(Self { modal, trigger: elements.trigger, close: elements.close, active_class: config.active_class })
    }

    /// The floating trigger was clicked.
    pub fn on_trigger_click(&self) {
        self.modal.add_class(&self.active_class);
    }

    /// The close button was clicked.
    pub fn on_close_click(&self) {
        self.modal.remove_class(&self.active_class);
    }

    /// A click reached the modal. Closes only when the click landed on the
    /// backdrop itself, not on content that bubbled up to it.
    pub fn on_modal_click(&self, target: &E) {
        if *target == self.modal {
            self.modal.remove_class(&self.active_class);
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.modal.has_class(&self.active_class)
    }

    #[must_use]
    pub fn modal(&self) -> &E {
        &self.modal
    }

    #[must_use]
    pub fn trigger(&self) -> Option<&E> {
        self.trigger.as_ref()
    }

    #[must_use]
    pub fn close_button(&self) -> Option<&E> {
        self.close.as_ref()
    }
}
