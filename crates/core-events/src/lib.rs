//! View event batching.
//!
//! State changes produced during one logical operation (a command, an edit, a
//! scroll) are coalesced into a single delivered batch: the first
//! `begin_emit` opens a collector, nested `begin_emit` calls only deepen a
//! counter, and the batch is handed to every listener exactly once when the
//! outermost scope closes. Scopes are RAII guards, so the counter decrements
//! on every exit path (early returns and unwinding included) and a failure
//! inside a nested operation can never leak an open batch.
//!
//! Invariants:
//! * Listeners never observe a partial or duplicated batch; events arrive in
//!   emission order.
//! * A batch with zero events fires no listener call.
//! * A panicking listener is reported to the fault handler and does not stop
//!   delivery to the remaining listeners, nor corrupt the collector.
//! * Subscribing or disposing a listener from inside a delivery is legal and
//!   takes effect for the next batch.
//!
//! Everything here is single-threaded: delivery is synchronous, and
//! reentrancy is handled through the nesting counter, not through locks.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

use core_text::Selection;
use tracing::{error, trace};

/// The closed set of state-change notifications. Each variant carries only
/// the minimal delta a listener needs, never full content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The configuration surface changed; listeners re-read what they need.
    ConfigurationChanged,
    /// Cursor/selection set replaced.
    CursorStateChanged { selections: Vec<Selection> },
    /// Content of an existing line range changed in place.
    LinesChanged { from_line: u32, count: u32 },
    /// Lines `from_line..=to_line` were inserted.
    LinesInserted { from_line: u32, to_line: u32 },
    /// Lines `from_line..=to_line` were deleted.
    LinesDeleted { from_line: u32, to_line: u32 },
    /// The visible window moved.
    ScrollChanged {
        first_line: u32,
        last_line: u32,
        scroll_top: u32,
    },
    /// Re-tokenization finished for a line range.
    TokensChanged { from_line: u32, to_line: u32 },
    /// The whole document was replaced.
    Flushed,
    /// Editor focus gained or lost.
    FocusChanged { focused: bool },
    /// Interleaved view zones changed.
    ZonesChanged,
}

/// Receives listener faults without aborting delivery.
pub trait FaultHandler {
    fn report(&self, message: &str);
}

/// Default fault channel: records the fault on the log.
pub struct LoggingFaultHandler;

impl FaultHandler for LoggingFaultHandler {
    fn report(&self, message: &str) {
        error!(target: "view.events", fault = message, "listener panicked during event delivery");
    }
}

type ListenerFn = Box<dyn FnMut(&[ViewEvent])>;

struct ListenerEntry {
    id: u64,
    callback: ListenerFn,
}

struct EmitterInner {
    nesting: u32,
    collector: Vec<ViewEvent>,
    listeners: Vec<ListenerEntry>,
    pending_adds: Vec<ListenerEntry>,
    pending_removes: Vec<u64>,
    deferred: VecDeque<Vec<ViewEvent>>,
    delivering: bool,
    next_id: u64,
    fault: Rc<dyn FaultHandler>,
}

/// The batching registration point. Cheap to clone; all clones share one
/// collector and listener set.
#[derive(Clone)]
pub struct ViewEventEmitter {
    inner: Rc<RefCell<EmitterInner>>,
}

/// Guard for one nesting level. The batch is delivered when the last guard
/// of the stack drops.
pub struct EmitScope {
    inner: Rc<RefCell<EmitterInner>>,
}

/// Disposal token for a subscription. Dropping it removes the listener;
/// `detach` keeps the listener alive for the emitter's lifetime.
pub struct ListenerHandle {
    id: u64,
    inner: Weak<RefCell<EmitterInner>>,
}

impl Default for ViewEventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewEventEmitter {
    pub fn new() -> Self {
        Self::with_fault_handler(Rc::new(LoggingFaultHandler))
    }

    pub fn with_fault_handler(fault: Rc<dyn FaultHandler>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EmitterInner {
                nesting: 0,
                collector: Vec::new(),
                listeners: Vec::new(),
                pending_adds: Vec::new(),
                pending_removes: Vec::new(),
                deferred: VecDeque::new(),
                delivering: false,
                next_id: 0,
                fault,
            })),
        }
    }

    /// Register a listener; the returned handle removes it on drop.
    #[must_use = "dropping the handle unsubscribes the listener"]
    pub fn subscribe(&self, callback: impl FnMut(&[ViewEvent]) + 'static) -> ListenerHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let entry = ListenerEntry {
            id,
            callback: Box::new(callback),
        };
        if inner.delivering {
            inner.pending_adds.push(entry);
        } else {
            inner.listeners.push(entry);
        }
        ListenerHandle {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Open (or deepen) the batching scope.
    pub fn begin_emit(&self) -> EmitScope {
        let mut inner = self.inner.borrow_mut();
        inner.nesting += 1;
        trace!(target: "view.events", nesting = inner.nesting, "emit scope opened");
        EmitScope {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Record one event into the open batch. Without an open scope the event
    /// becomes its own single-event batch.
    pub fn emit(&self, event: ViewEvent) {
        let needs_scope = self.inner.borrow().nesting == 0;
        if needs_scope {
            let _scope = self.begin_emit();
            self.inner.borrow_mut().collector.push(event);
            return;
        }
        self.inner.borrow_mut().collector.push(event);
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl Drop for EmitScope {
    fn drop(&mut self) {
        let events = {
            let mut inner = self.inner.borrow_mut();
            inner.nesting -= 1;
            if inner.nesting > 0 {
                return;
            }
            std::mem::take(&mut inner.collector)
        };
        if events.is_empty() {
            return;
        }
        let deliver_now = {
            let mut inner = self.inner.borrow_mut();
            if inner.delivering {
                // A listener opened its own batch; run it after the current
                // delivery loop finishes.
                inner.deferred.push_back(events);
                None
            } else {
                Some(events)
            }
        };
        if let Some(events) = deliver_now {
            deliver(&self.inner, events);
        }
    }
}

fn deliver(inner_rc: &Rc<RefCell<EmitterInner>>, first: Vec<ViewEvent>) {
    let mut batch = Some(first);
    while let Some(events) = batch.take() {
        let (mut listeners, fault) = {
            let mut inner = inner_rc.borrow_mut();
            inner.delivering = true;
            (std::mem::take(&mut inner.listeners), Rc::clone(&inner.fault))
        };
        trace!(
            target: "view.events",
            events = events.len(),
            listeners = listeners.len(),
            "delivering batch"
        );
        for entry in listeners.iter_mut() {
            let disposed = inner_rc.borrow().pending_removes.contains(&entry.id);
            if disposed {
                continue;
            }
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| (entry.callback)(&events))) {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                fault.report(&message);
            }
        }
        let mut inner = inner_rc.borrow_mut();
        inner.delivering = false;
        let adds = std::mem::take(&mut inner.pending_adds);
        listeners.extend(adds);
        let removes = std::mem::take(&mut inner.pending_removes);
        listeners.retain(|e| !removes.contains(&e.id));
        inner.listeners = listeners;
        batch = inner.deferred.pop_front();
    }
}

impl ListenerHandle {
    /// Keep the listener registered for the emitter's lifetime.
    pub fn detach(mut self) {
        self.inner = Weak::new();
    }

    /// Remove the listener now (equivalent to dropping the handle).
    pub fn dispose(self) {}
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(inner_rc) = self.inner.upgrade() {
            let mut inner = inner_rc.borrow_mut();
            if inner.delivering {
                inner.pending_removes.push(self.id);
            } else {
                let id = self.id;
                inner.listeners.retain(|e| e.id != id);
            }
        }
    }
}
