//! Section highlighting for long pages. A [`Viewport`] owns the scroll
//! listeners of one mounted page; every listener is tied to the lifetime of
//! its [`Subscription`].

use alloc::{
    boxed::Box,
    collections::BTreeMap,
    rc::{Rc, Weak},
    vec::Vec,
};
use core::cell::{Cell, RefCell};

type Listener = Box<dyn FnMut(u32)>;

#[derive(Default)]
struct Listeners {
    next: u64,
    entries: BTreeMap<u64, Listener>,
}

/// Single-threaded source of scroll positions.
#[derive(Default)]
pub struct Viewport {
    listeners: Rc<RefCell<Listeners>>,
    position: Cell<u32>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> u32 {
        self.position.get()
    }

    /// Registers a listener and immediately notifies it of the current
    /// position. Listeners must not subscribe or unsubscribe while being
    /// notified.
    pub fn subscribe<F>(&self, mut listener: F) -> Subscription
    where
        F: FnMut(u32) + 'static,
    {
        listener(self.position.get());
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next;
        listeners.next += 1;
        listeners.entries.insert(id, Box::new(listener));
        Subscription { id, listeners: Rc::downgrade(&self.listeners) }
    }

    pub fn scroll_to(&self, position: u32) {
        self.position.set(position);
        for listener in self.listeners.borrow_mut().entries.values_mut() {
            listener(position);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Removes its listener from the [`Viewport`] when dropped.
#[must_use = "dropping a subscription immediately unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.remove(&self.id);
        }
    }
}

/// Maps scroll positions to the section currently being read.
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    /// Sorted by offset.
    sections: Vec<(Box<str>, u32)>,
    /// Distance below the top edge at which a section becomes active.
    margin: u32,
}

impl ScrollSpy {
    pub fn new<I, A>(sections: I, margin: u32) -> Self
    where
        I: IntoIterator<Item = (A, u32)>,
        A: Into<Box<str>>,
    {
        let mut sections: Vec<_> = sections.into_iter().map(|(anchor, offset)| (anchor.into(), offset)).collect();
        sections.sort_by_key(|&(_, offset)| offset);
        Self { sections, margin }
    }

    fn position(&self, y: u32) -> Option<usize> {
        let line = y.saturating_add(self.margin);
        self.sections.partition_point(|&(_, offset)| offset <= line).checked_sub(1)
    }

    /// The last section whose offset has been scrolled past.
    pub fn active(&self, y: u32) -> Option<&str> {
        self.position(y).map(|i| &*self.sections[i].0)
    }

    /// Follows the viewport until the returned tracker is dropped.
    pub fn attach(self, viewport: &Viewport) -> Tracker {
        let spy = Rc::new(self);
        let active = Rc::new(Cell::new(None));
        let subscription = {
            let spy = Rc::clone(&spy);
            let active = Rc::clone(&active);
            viewport.subscribe(move |y| active.set(spy.position(y)))
        };
        Tracker { spy, active, _subscription: subscription }
    }
}

pub struct Tracker {
    spy: Rc<ScrollSpy>,
    active: Rc<Cell<Option<usize>>>,
    _subscription: Subscription,
}

impl Tracker {
    pub fn active(&self) -> Option<&str> {
        self.active.get().map(|i| &*self.spy.sections[i].0)
    }
}
