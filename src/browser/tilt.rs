//! DOM tilt backend.
//!
//! Each attached card gets mouse listeners (and a window orientation listener
//! when gyroscope input is on) plus an injected glare layer. Listeners are
//! owned by the binding, so detaching drops them; the card's inline tilt
//! styles, the glare layer and any pending transition timer go with it.

use std::cell::Cell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{DeviceOrientationEvent, Document, HtmlElement, MouseEvent};

use crate::browser::host::bounds;
use crate::consts::{GLARE_INNER_CLASS, GLARE_WRAPPER_CLASS};
use crate::dom::{Element, Point};
use crate::tilt::{TiltBackend, TiltFrame, TiltSettings, TransitionTimer, glare_diameter};

struct Glare {
    wrapper: HtmlElement,
    inner: HtmlElement,
    diameter: Cell<f64>,
}

impl Glare {
    /// Keep the gradient covering the card as its size changes.
    fn fit(&self, element: &HtmlElement) {
        let diameter = glare_diameter(f64::from(element.offset_width()), f64::from(element.offset_height()));
        if (diameter - self.diameter.get()).abs() < 0.5 {
            return;
        }
        self.diameter.set(diameter);
        let size = format!("{diameter}px");
        self.inner.set_style("width", &size);
        self.inner.set_style("height", &size);
    }
}

type Timer = Rc<TransitionTimer<Timeout>>;

struct TiltBinding {
    element: HtmlElement,
    glare: Option<Rc<Glare>>,
    timer: Timer,
    _listeners: Vec<EventListener>,
}

/// Tilt instances keyed by element.
pub struct DomTilt {
    document: Document,
    bindings: Vec<TiltBinding>,
}

impl DomTilt {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document, bindings: Vec::new() }
    }

    fn create_glare(&self, element: &HtmlElement) -> Option<Glare> {
        let wrapper = create_div(&self.document, GLARE_WRAPPER_CLASS)?;
        let inner = create_div(&self.document, GLARE_INNER_CLASS)?;

        for (property, value) in [
            ("position", "absolute"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("overflow", "hidden"),
            ("pointer-events", "none"),
            ("border-radius", "inherit"),
        ] {
            wrapper.set_style(property, value);
        }

        for (property, value) in [
            ("position", "absolute"),
            ("top", "50%"),
            ("left", "50%"),
            ("pointer-events", "none"),
            ("background-image", "linear-gradient(0deg, rgba(255,255,255,0) 0%, rgba(255,255,255,1) 100%)"),
            ("transform", "rotate(180deg) translate(-50%, -50%)"),
            ("transform-origin", "0% 0%"),
            ("opacity", "0"),
        ] {
            inner.set_style(property, value);
        }

        if let Err(e) = wrapper.append_child(&inner) {
            log::warn!("glare layer not assembled: {e:?}");
            return None;
        }
        if let Err(e) = element.append_child(&wrapper) {
            log::warn!("glare layer not attached: {e:?}");
            return None;
        }
        let glare = Glare { wrapper, inner, diameter: Cell::new(f64::NAN) };
        glare.fit(element);
        Some(glare)
    }
}

impl TiltBackend<HtmlElement> for DomTilt {
    fn attach(&mut self, element: &HtmlElement, settings: &TiltSettings) {
        if self.bindings.iter().any(|b| b.element == *element) {
            return;
        }
        let settings = Rc::new(settings.clone());
        let glare = if settings.glare { self.create_glare(element).map(Rc::new) } else { None };
        let timer: Timer = Rc::new(TransitionTimer::default());
        element.set_style("will-change", "transform");

        let mut listeners = Vec::with_capacity(4);

        {
            let el = element.clone();
            let settings = Rc::clone(&settings);
            let timer = Rc::clone(&timer);
            listeners.push(EventListener::new(element, "mouseenter", move |_| {
                start_transition(&el, &settings, &timer);
            }));
        }

        {
            let el = element.clone();
            let settings = Rc::clone(&settings);
            let glare = glare.clone();
            listeners.push(EventListener::new(element, "mousemove", move |event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let pointer = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
                let frame = settings.frame(pointer, bounds(&el));
                apply_frame(&el, glare.as_deref(), &settings, &frame);
            }));
        }

        {
            let el = element.clone();
            let settings = Rc::clone(&settings);
            let glare = glare.clone();
            let timer = Rc::clone(&timer);
            listeners.push(EventListener::new(element, "mouseleave", move |_| {
                start_transition(&el, &settings, &timer);
                el.set_style("transform", &settings.rest_transform());
                if let Some(glare) = &glare {
                    glare.inner.set_style("opacity", "0");
                }
            }));
        }

        if settings.gyroscope {
            if let Some(window) = web_sys::window() {
                let el = element.clone();
                let settings = Rc::clone(&settings);
                let glare = glare.clone();
                listeners.push(EventListener::new(&window, "deviceorientation", move |event| {
                    let Some(orientation) = event.dyn_ref::<DeviceOrientationEvent>() else {
                        return;
                    };
                    let (Some(beta), Some(gamma)) = (orientation.beta(), orientation.gamma()) else {
                        return;
                    };
                    let rect = bounds(&el);
                    let frame = settings.frame(settings.pointer_from_orientation(beta, gamma, rect), rect);
                    apply_frame(&el, glare.as_deref(), &settings, &frame);
                }));
            }
        }

        self.bindings.push(TiltBinding { element: element.clone(), glare, timer, _listeners: listeners });
    }

    fn detach(&mut self, element: &HtmlElement) {
        let Some(pos) = self.bindings.iter().position(|b| b.element == *element) else {
            return;
        };
        let binding = self.bindings.swap_remove(pos);
        binding.timer.cancel();
        if let Some(glare) = &binding.glare {
            glare.wrapper.remove();
        }
        for property in ["transform", "transition", "will-change"] {
            binding.element.clear_style(property);
        }
    }
}

fn apply_frame(element: &HtmlElement, glare: Option<&Glare>, settings: &TiltSettings, frame: &TiltFrame) {
    element.set_style("transform", &settings.transform(frame));
    if let Some(glare) = glare {
        glare.fit(element);
        glare.inner.set_style("transform", &TiltSettings::glare_transform(frame));
        glare.inner.set_style("opacity", &settings.glare_opacity(frame).to_string());
    }
}

/// Ease into the next pose, then drop the transition so pointer tracking is immediate.
///
/// An earlier transition's timer is cancelled so it cannot cut this one short.
fn start_transition(element: &HtmlElement, settings: &TiltSettings, timer: &TransitionTimer<Timeout>) {
    element.set_style("transition", &settings.transition());
    let el = element.clone();
    timer.restart(Timeout::new(settings.speed, move || {
        el.clear_style("transition");
    }));
}

fn create_div(document: &Document, class: &str) -> Option<HtmlElement> {
    let element = match document.create_element("div") {
        Ok(element) => element,
        Err(e) => {
            log::warn!("create element failed: {e:?}");
            return None;
        }
    };
    element.set_class_name(class);
    match element.dyn_into::<HtmlElement>() {
        Ok(div) => Some(div),
        Err(_) => None,
    }
}
