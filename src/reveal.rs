//! Scroll-triggered reveal.
//!
//! Every element marked `hidden` at mount is watched for viewport
//! intersection. The `show` marker tracks the latest observation both ways, so
//! the entrance animation replays each time an element scrolls back into view.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::config::RevealConfig;
use crate::dom::Element;

/// One entry of an intersection batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<E> {
    pub target: E,
    /// Any overlap with the viewport counts.
    pub is_intersecting: bool,
}

/// The fixed set of reveal targets and the marker they receive.
pub struct RevealObserver<E> {
    targets: Vec<E>,
    shown_class: String,
}

impl<E: Element> RevealObserver<E> {
    /// Keep the candidates that carry the hidden marker.
    pub fn mount(candidates: Vec<E>, config: RevealConfig) -> Self {
        let targets: Vec<E> = candidates.into_iter().filter(|el| el.has_class(&config.hidden_class)).collect();
        log::debug!("reveal observing {} elements", targets.len());
        Self { targets, shown_class: config.shown_class }
    }

    /// Apply one intersection batch. Entries for unobserved elements are ignored.
    pub fn on_intersections(&self, entries: &[Intersection<E>]) {
        for entry in entries {
            if !self.targets.contains(&entry.target) {
                continue;
            }
            if entry.is_intersecting {
                entry.target.add_class(&self.shown_class);
            } else {
                entry.target.remove_class(&self.shown_class);
            }
        }
    }

    /// Elements the observer watches.
    #[must_use]
    pub fn targets(&self) -> &[E] {
        &self.targets
    }
}
