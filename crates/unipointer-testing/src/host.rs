//! In-memory event host.
//!
//! Mimics a DOM just far enough for the gesture engine: two targets, a
//! listener registry, and bubbling from the surface to the document.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use unipointer_core::collections::map::HashMap;
use unipointer_core::{Capabilities, EventHandler, EventHost, RawEvent, SubscriptionId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScriptTarget {
    Surface,
    Document,
}

struct Listener {
    target: ScriptTarget,
    event: &'static str,
    handler: EventHandler,
}

#[derive(Default)]
struct HostState {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
    /// Registration order, so dispatch runs listeners like a DOM would.
    order: Vec<u64>,
    removed: usize,
}

/// Scripted host; clones share the same listener registry.
#[derive(Clone)]
pub struct ScriptedHost {
    capabilities: Capabilities,
    state: Rc<RefCell<HostState>>,
}

impl ScriptedHost {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            state: Rc::new(RefCell::new(HostState::default())),
        }
    }

    pub fn touch_only() -> Self {
        Self::new(Capabilities::TOUCH_ONLY)
    }

    pub fn pointer_events() -> Self {
        Self::new(Capabilities::POINTER)
    }

    pub fn legacy_pointer_events() -> Self {
        Self::new(Capabilities::LEGACY_POINTER)
    }

    /// Dispatches `event` at `target`; events on the surface bubble to the
    /// document. Returns how many listeners ran.
    pub fn dispatch(&self, target: ScriptTarget, name: &str, event: &RawEvent) -> usize {
        let path: &[ScriptTarget] = match target {
            ScriptTarget::Surface => &[ScriptTarget::Surface, ScriptTarget::Document],
            ScriptTarget::Document => &[ScriptTarget::Document],
        };
        let mut invoked = 0;
        for &current in path {
            // Snapshot first: handlers may (un)subscribe while running.
            for handler in self.handlers_for(current, name) {
                handler(event);
                invoked += 1;
            }
        }
        invoked
    }

    fn handlers_for(&self, target: ScriptTarget, name: &str) -> Vec<EventHandler> {
        let state = self.state.borrow();
        state
            .order
            .iter()
            .filter_map(|id| state.listeners.get(id))
            .filter(|listener| listener.target == target && listener.event == name)
            .map(|listener| Rc::clone(&listener.handler))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn listeners_on(&self, target: ScriptTarget) -> Vec<&'static str> {
        let state = self.state.borrow();
        state
            .order
            .iter()
            .filter_map(|id| state.listeners.get(id))
            .filter(|listener| listener.target == target)
            .map(|listener| listener.event)
            .collect()
    }

    pub fn has_listener(&self, target: ScriptTarget, name: &str) -> bool {
        self.listeners_on(target).contains(&name)
    }

    /// Total successful unsubscribe calls, for leak and double-release checks.
    pub fn removed_count(&self) -> usize {
        self.state.borrow().removed
    }
}

impl EventHost for ScriptedHost {
    type Target = ScriptTarget;
    type Error = Infallible;

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn document(&self) -> ScriptTarget {
        ScriptTarget::Document
    }

    fn subscribe(
        &self,
        target: &ScriptTarget,
        event: &'static str,
        handler: EventHandler,
    ) -> Result<SubscriptionId, Infallible> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.listeners.insert(
            id,
            Listener {
                target: *target,
                event,
                handler,
            },
        );
        state.order.push(id);
        Ok(SubscriptionId(id))
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        let mut state = self.state.borrow_mut();
        if state.listeners.remove(&subscription.0).is_some() {
            state.order.retain(|id| *id != subscription.0);
            state.removed += 1;
        } else {
            log::warn!("unsubscribe of unknown {subscription:?}");
        }
    }
}
