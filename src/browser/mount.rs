//! Element discovery, listener wiring and the wasm entry points.
//!
//! DESIGN
//! ======
//! [`mount_page`] collects the page's elements, mounts the core [`Page`] and
//! binds one listener per element per event. Every listener forwards a
//! [`PageEvent`] to the shared page. The returned [`PageHandle`] owns all
//! listeners and the intersection observer; dropping it removes them and
//! tears down tilt instances.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry, NodeList};

use crate::browser::host::{LocalStorage, MediaColorScheme, TimeoutScheduler, as_html_element, viewport_width};
use crate::browser::tilt::DomTilt;
use crate::carousel::CarouselElements;
use crate::config::{CarouselConfig, PageConfig};
use crate::consts::CONFIG_ELEMENT_ID;
use crate::dom::{ColorScheme, NoColorScheme, NoStorage, PreferenceStore};
use crate::page::{Page, PageElements, PageEvent, Services};
use crate::popup::PopupElements;
use crate::reveal::Intersection;

type SharedPage = Rc<RefCell<Page<HtmlElement>>>;
type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

thread_local! {
    static MOUNTED: RefCell<Option<PageHandle>> = const { RefCell::new(None) };
}

/// Wasm entry point: install logging and mount the page.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // The host page may already have installed a logger.
    console_log::init_with_level(log::Level::Info).unwrap_or_default();

    unmount();
    let handle = mount_page();
    MOUNTED.with(|mounted| *mounted.borrow_mut() = handle);
}

/// Remove every listener installed by [`start`].
#[wasm_bindgen]
pub fn unmount() {
    let previous = MOUNTED.with(|mounted| mounted.borrow_mut().take());
    if previous.is_some() {
        log::info!("page unmounted");
    }
}

/// Keeps the page's listeners alive. Dropping it detaches everything.
pub struct PageHandle {
    page: SharedPage,
    listeners: Vec<EventListener>,
    observer: Option<RevealBinding>,
}

impl PageHandle {
    /// Detach every listener and tilt instance now.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for PageHandle {
    fn drop(&mut self) {
        self.listeners.clear();
        self.observer = None;
        match self.page.try_borrow_mut() {
            Ok(mut page) => page.dispose(),
            Err(_) => log::warn!("page busy during dispose; tilt left attached"),
        }
    }
}

struct RevealBinding {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Drop for RevealBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Mount the page controller on the current document.
///
/// Returns `None` outside a browser window.
pub fn mount_page() -> Option<PageHandle> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let config = load_config(&document);
    let elements = collect_elements(&document, &config);
    let services = Services {
        store: preference_store(),
        color_scheme: color_scheme(),
        tilt: Box::new(DomTilt::new(document.clone())),
        scheduler: Rc::new(TimeoutScheduler),
    };
    let page: SharedPage = Rc::new(RefCell::new(Page::mount(config, elements, services, viewport_width(&window))));

    let mut listeners = Vec::new();
    {
        let page_ref = page.borrow();

        if page_ref.theme().is_some() {
            if let Some(toggle) = page_ref.theme_toggle() {
                listeners.push(bind(toggle, "click", &page, |_| Some(PageEvent::ThemeToggleClick)));
            }
        }

        if let Some(popup) = page_ref.popup() {
            if let Some(trigger) = popup.trigger() {
                listeners.push(bind(trigger, "click", &page, |_| Some(PageEvent::PopupTriggerClick)));
            }
            if let Some(close) = popup.close_button() {
                listeners.push(bind(close, "click", &page, |_| Some(PageEvent::PopupCloseClick)));
            }
            listeners.push(bind(popup.modal(), "click", &page, |event| {
                let target = as_html_element(event.target()?)?;
                Some(PageEvent::PopupModalClick { target })
            }));
        }

        if let Some(carousel) = page_ref.carousel() {
            if let Some(prev) = &carousel.elements().prev {
                listeners.push(bind(prev, "click", &page, |_| Some(PageEvent::CarouselPrevClick)));
            }
            if let Some(next) = &carousel.elements().next {
                listeners.push(bind(next, "click", &page, |_| Some(PageEvent::CarouselNextClick)));
            }
        }
    }

    {
        let window_for_cb = window.clone();
        listeners.push(bind(&window, "resize", &page, move |_| {
            Some(PageEvent::Resize { viewport_width: viewport_width(&window_for_cb) })
        }));
    }

    let targets = page.borrow().reveal().targets().to_vec();
    let observer = observe_reveal(&targets, &page);

    Some(PageHandle { page, listeners, observer })
}

fn preference_store() -> Box<dyn PreferenceStore> {
    if LocalStorage::is_available() {
        Box::new(LocalStorage)
    } else {
        log::info!("localStorage unavailable; theme choice will not persist");
        Box::new(NoStorage)
    }
}

fn color_scheme() -> Box<dyn ColorScheme> {
    if MediaColorScheme::is_supported() {
        Box::new(MediaColorScheme)
    } else {
        log::debug!("prefers-color-scheme unsupported");
        Box::new(NoColorScheme)
    }
}

fn bind<F>(target: &EventTarget, event_type: &'static str, page: &SharedPage, to_event: F) -> EventListener
where
    F: Fn(&Event) -> Option<PageEvent<HtmlElement>> + 'static,
{
    let page = Rc::clone(page);
    EventListener::new(target, event_type, move |event| {
        if let Some(page_event) = to_event(event) {
            dispatch(&page, page_event);
        }
    })
}

fn dispatch(page: &SharedPage, event: PageEvent<HtmlElement>) {
    match page.try_borrow_mut() {
        Ok(mut page) => page.dispatch(event),
        Err(_) => log::warn!("page busy; dropped {event:?}"),
    }
}

fn observe_reveal(targets: &[HtmlElement], page: &SharedPage) -> Option<RevealBinding> {
    if targets.is_empty() {
        return None;
    }

    let page = Rc::clone(page);
    let callback: ObserverCallback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        let batch: Vec<Intersection<HtmlElement>> = entries
            .iter()
            .filter_map(|entry| match entry.dyn_into::<IntersectionObserverEntry>() {
                Ok(entry) => Some(entry),
                Err(_) => None,
            })
            .filter_map(|entry| {
                let target = as_html_element(entry.target())?;
                Some(Intersection { target, is_intersecting: entry.is_intersecting() })
            })
            .collect();
        dispatch(&page, PageEvent::Intersections(batch));
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let observer = match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(e) => {
            log::warn!("IntersectionObserver unavailable; reveal inert: {e:?}");
            return None;
        }
    };
    for target in targets {
        observer.observe(target);
    }
    Some(RevealBinding { observer, _callback: callback })
}

fn load_config(document: &Document) -> PageConfig {
    let Some(raw) = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            PageConfig::default()
        }
    }
}

fn collect_elements(document: &Document, config: &PageConfig) -> PageElements<HtmlElement> {
    let by_id = |id: &str| document.get_element_by_id(id).and_then(as_html_element);

    PageElements {
        body: document.body(),
        theme_toggle: by_id(&config.theme.toggle_id),
        project_cards: elements_of(document.query_selector_all(&config.tilt.card_selector), &config.tilt.card_selector),
        reveal_targets: {
            let selector = format!(".{}", config.reveal.hidden_class);
            elements_of(document.query_selector_all(&selector), &selector)
        },
        popup: PopupElements {
            trigger: by_id(&config.popup.trigger_id),
            modal: by_id(&config.popup.modal_id),
            close: by_id(&config.popup.close_id),
        },
        carousel: collect_carousel(document, &config.carousel),
    }
}

fn collect_carousel(document: &Document, config: &CarouselConfig) -> Option<CarouselElements<HtmlElement>> {
    let root = first_of(document.query_selector(&config.root_selector), &config.root_selector)?;
    Some(CarouselElements {
        track: first_of(root.query_selector(&config.track_selector), &config.track_selector),
        slides: elements_of(root.query_selector_all(&config.slide_selector), &config.slide_selector),
        cards: elements_of(root.query_selector_all(&config.card_selector), &config.card_selector),
        prev: first_of(document.query_selector(&config.prev_selector), &config.prev_selector),
        next: first_of(document.query_selector(&config.next_selector), &config.next_selector),
        root,
    })
}

fn first_of(result: Result<Option<web_sys::Element>, wasm_bindgen::JsValue>, selector: &str) -> Option<HtmlElement> {
    match result {
        Ok(element) => element.and_then(as_html_element),
        Err(e) => {
            log::warn!("bad selector {selector}: {e:?}");
            None
        }
    }
}

fn elements_of(result: Result<NodeList, wasm_bindgen::JsValue>, selector: &str) -> Vec<HtmlElement> {
    let list = match result {
        Ok(list) => list,
        Err(e) => {
            log::warn!("bad selector {selector}: {e:?}");
            return Vec::new();
        }
    };
    (0..list.length()).filter_map(|i| list.item(i)).filter_map(as_html_element).collect()
}
