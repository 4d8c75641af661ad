//! [`EventHost`] over real DOM listeners.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};
use unipointer_core::collections::map::HashMap;
use unipointer_core::{Capabilities, EventHandler, EventHost, SubscriptionId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, EventTarget, Navigator};

use crate::error::WebHostError;
use crate::translate::{apply_effects, translate};

type NativeListener = Closure<dyn FnMut(web_sys::Event)>;

struct Registration {
    target: EventTarget,
    event: &'static str,
    closure: NativeListener,
}

impl Registration {
    fn detach(&self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            warn!("removing {} listener failed: {err:?}", self.event);
        }
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    live: HashMap<u64, Registration>,
    /// Detached closures that may still be on the call stack. Freed when the
    /// next top-level dispatch begins.
    retired: Vec<Registration>,
}

impl Drop for Registry {
    fn drop(&mut self) {
        for registration in self.live.values() {
            registration.detach();
        }
    }
}

/// Browser event host. Clones share one listener registry.
#[derive(Clone)]
pub struct WebHost {
    document: EventTarget,
    capabilities: Capabilities,
    registry: Rc<RefCell<Registry>>,
    dispatch_depth: Rc<Cell<usize>>,
}

impl WebHost {
    /// Binds to the global window, probing its pointer capabilities.
    pub fn new() -> Result<Self, WebHostError> {
        let window = web_sys::window().ok_or(WebHostError::NoWindow)?;
        let document = window.document().ok_or(WebHostError::NoDocument)?;
        let capabilities = probe_capabilities(&window.navigator());
        debug!("probed {capabilities:?}");
        Ok(Self {
            document: document.into(),
            capabilities,
            registry: Rc::new(RefCell::new(Registry::default())),
            dispatch_depth: Rc::new(Cell::new(0)),
        })
    }

    /// Overrides the probed capabilities, e.g. to force pointer events in
    /// browsers that support them without advertising `pointerEnabled`.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().live.len()
    }

    fn native_listener(&self, event: &'static str, handler: EventHandler) -> NativeListener {
        let registry = Rc::downgrade(&self.registry);
        let depth = Rc::clone(&self.dispatch_depth);
        Closure::wrap(Box::new(move |native: web_sys::Event| {
            let Some(raw) = translate(event, &native) else {
                trace!("untranslatable {event} event");
                return;
            };
            if depth.get() == 0 {
                free_retired(&registry);
            }
            depth.set(depth.get() + 1);
            handler(&raw);
            depth.set(depth.get() - 1);
            apply_effects(&native, &raw);
        }) as Box<dyn FnMut(_)>)
    }
}

fn free_retired(registry: &Weak<RefCell<Registry>>) {
    if let Some(registry) = registry.upgrade() {
        let retired = std::mem::take(&mut registry.borrow_mut().retired);
        drop(retired);
    }
}

/// Reads `navigator.pointerEnabled` and `navigator.msPointerEnabled`.
pub fn probe_capabilities(navigator: &Navigator) -> Capabilities {
    Capabilities {
        pointer_events: navigator_flag(navigator, "pointerEnabled"),
        legacy_pointer_events: navigator_flag(navigator, "msPointerEnabled"),
    }
}

fn navigator_flag(navigator: &Navigator, name: &str) -> bool {
    js_sys::Reflect::get(navigator, &JsValue::from_str(name))
        .map(|value| value.is_truthy())
        .unwrap_or(false)
}

impl EventHost for WebHost {
    type Target = EventTarget;
    type Error = WebHostError;

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn document(&self) -> EventTarget {
        self.document.clone()
    }

    fn subscribe(
        &self,
        target: &EventTarget,
        event: &'static str,
        handler: EventHandler,
    ) -> Result<SubscriptionId, WebHostError> {
        let closure = self.native_listener(event, handler);
        // Document-level touch listeners default to passive in modern
        // browsers, which would ignore prevent_default.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| WebHostError::subscribe(event, err))?;

        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.live.insert(
            id,
            Registration {
                target: target.clone(),
                event,
                closure,
            },
        );
        Ok(SubscriptionId(id))
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        let mut registry = self.registry.borrow_mut();
        match registry.live.remove(&subscription.0) {
            Some(registration) => {
                registration.detach();
                registry.retired.push(registration);
            }
            None => warn!("unsubscribe of unknown {subscription:?}"),
        }
    }
}
