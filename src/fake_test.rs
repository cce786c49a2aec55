//! In-memory DOM and host services for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use crate::dom::{ColorScheme, Element, PreferenceStore, Scheduler};
use crate::error::StorageError;
use crate::tilt::{TiltBackend, TiltSettings};

struct Node {
    id: usize,
    classes: RefCell<BTreeSet<String>>,
    styles: RefCell<BTreeMap<String, String>>,
    natural_height: Cell<f64>,
    width: Cell<f64>,
}

/// A fake element. Clones share the same node.
#[derive(Clone)]
pub struct FakeElement(Rc<Node>);

thread_local! {
    static NEXT_ID: Cell<usize> = const { Cell::new(1) };
}

impl FakeElement {
    pub fn new() -> Self {
        let id = NEXT_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        Self(Rc::new(Node {
            id,
            classes: RefCell::new(BTreeSet::new()),
            styles: RefCell::new(BTreeMap::new()),
            natural_height: Cell::new(0.0),
            width: Cell::new(0.0),
        }))
    }

    pub fn with_class(class: &str) -> Self {
        let el = Self::new();
        el.add_class(class);
        el
    }

    pub fn with_height(height: f64) -> Self {
        let el = Self::new();
        el.set_natural_height(height);
        el
    }

    pub fn with_width(width: f64) -> Self {
        let el = Self::new();
        el.0.width.set(width);
        el
    }

    pub fn id(&self) -> usize {
        self.0.id
    }

    /// Content-driven height, used whenever no inline height is set.
    pub fn set_natural_height(&self, height: f64) {
        self.0.natural_height.set(height);
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.styles.borrow().get(property).cloned()
    }

    pub fn class_count(&self) -> usize {
        self.0.classes.borrow().len()
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeElement")
            .field("id", &self.0.id)
            .field("classes", &self.0.classes.borrow())
            .finish_non_exhaustive()
    }
}

impl Element for FakeElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().contains(class)
    }

    fn add_class(&self, class: &str) {
        self.0.classes.borrow_mut().insert(class.to_owned());
    }

    fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().remove(class);
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0.styles.borrow_mut().insert(property.to_owned(), value.to_owned());
    }

    fn clear_style(&self, property: &str) {
        self.0.styles.borrow_mut().remove(property);
    }

    fn offset_height(&self) -> f64 {
        self.style("height")
            .and_then(|h| h.trim_end_matches("px").parse().ok())
            .unwrap_or_else(|| self.0.natural_height.get())
    }

    fn client_width(&self) -> f64 {
        self.0.width.get()
    }
}

/// Shared map-backed storage. `available = false` behaves like private mode.
#[derive(Clone)]
pub struct FakeStorage {
    pub values: Rc<RefCell<HashMap<String, String>>>,
    pub available: bool,
}

impl FakeStorage {
    pub fn empty() -> Self {
        Self { values: Rc::default(), available: true }
    }

    pub fn with(key: &str, value: &str) -> Self {
        let storage = Self::empty();
        storage.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        storage
    }

    pub fn unavailable() -> Self {
        Self { values: Rc::default(), available: false }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for FakeStorage {
    fn load(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        self.get(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub struct FakeScheme(pub Option<bool>);

impl ColorScheme for FakeScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

/// Queues deferred tasks until [`FakeScheduler::run_pending`].
#[derive(Clone, Default)]
pub struct FakeScheduler {
    queue: Rc<RefCell<Vec<(u32, Box<dyn FnOnce()>)>>>,
}

impl FakeScheduler {
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.queue.borrow().iter().map(|(d, _)| *d).collect()
    }

    pub fn run_pending(&self) {
        let tasks: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        for (_, task) in tasks {
            task();
        }
    }
}

impl Scheduler for FakeScheduler {
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push((delay_ms, task));
    }
}

/// Records attach/detach calls per element id.
#[derive(Clone, Default)]
pub struct FakeTilt {
    pub attached: Rc<RefCell<Vec<usize>>>,
    pub attach_calls: Rc<Cell<usize>>,
    pub detach_calls: Rc<Cell<usize>>,
    pub last_settings: Rc<RefCell<Option<TiltSettings>>>,
}

impl FakeTilt {
    pub fn attached_ids(&self) -> Vec<usize> {
        let mut ids = self.attached.borrow().clone();
        ids.sort_unstable();
        ids
    }
}

impl TiltBackend<FakeElement> for FakeTilt {
    fn attach(&mut self, element: &FakeElement, settings: &TiltSettings) {
        self.attach_calls.set(self.attach_calls.get() + 1);
        self.attached.borrow_mut().push(element.id());
        *self.last_settings.borrow_mut() = Some(settings.clone());
    }

    fn detach(&mut self, element: &FakeElement) {
        self.detach_calls.set(self.detach_calls.get() + 1);
        self.attached.borrow_mut().retain(|id| *id != element.id());
    }
}
