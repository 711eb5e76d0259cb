//! Event bus between the session controller / archive and the UI.
//!
//! Single-threaded (WASM constraint), shared through `Rc<RefCell<..>>`.
//! The UI drains it once per frame and re-projects whatever changed.
//! The buffer is bounded: when nobody drains it (assistant panel hidden),
//! the oldest events are dropped.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use insight_types::event::SessionEvent;

pub const DEFAULT_CAPACITY: usize = 256;

/// Shared event bus, clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<Buffer>>,
}

struct Buffer {
    events: VecDeque<SessionEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Buffer {
                events: VecDeque::new(),
                capacity: capacity.max(1),
                dropped: 0,
            })),
        }
    }

    pub fn emit(&self, event: SessionEvent) {
        let mut buf = self.inner.borrow_mut();
        if buf.events.len() == buf.capacity {
            buf.events.pop_front();
            buf.dropped += 1;
            if buf.dropped == 1 {
                log::warn!("Event bus full, dropping oldest events");
            }
        }
        buf.events.push_back(event);
    }

    /// Take every buffered event, oldest first.
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.inner.borrow_mut().events.drain(..).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
