//! Listener lifecycle: attaches the engine to a surface and owns every
//! native subscription it acquires.
//!
//! Surface listeners (start, dragstart, click) live from [`GestureHandle::attach`]
//! until [`GestureHandle::destroy`]. Session listeners (move, end, cancel) are
//! attached to the document scope on each admitted start and released exactly
//! once when that session ends, is replaced by an overlapping start, or the
//! handle is destroyed.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::backend::{
    secondary_start_backend, select_backend, Backend, CLICK_EVENT, DRAG_START_EVENT,
};
use crate::config::GestureConfig;
use crate::engine::{Emission, GestureEngine, GestureState};
use crate::event::RawEvent;
use crate::host::{EventHandler, EventHost, SubscriptionId};

struct Listeners<H: EventHost> {
    this: Weak<Listeners<H>>,
    host: H,
    surface: H::Target,
    backend: Backend,
    config: Rc<GestureConfig>,
    engine: RefCell<GestureEngine>,
    clicks_allowed: Rc<Cell<bool>>,
    surface_subscriptions: RefCell<Vec<SubscriptionId>>,
    session_subscriptions: RefCell<Vec<SubscriptionId>>,
    destroyed: Cell<bool>,
}

impl<H: EventHost + 'static> Listeners<H> {
    /// Wraps `f` into a host handler that goes inert once the handle is gone.
    fn handler(&self, f: impl Fn(&Self, &RawEvent) + 'static) -> EventHandler {
        let this = self.this.clone();
        Rc::new(move |event: &RawEvent| {
            if let Some(listeners) = this.upgrade() {
                if !listeners.destroyed.get() {
                    f(&listeners, event);
                }
            }
        })
    }

    fn subscribe_surface(&self) -> Result<(), H::Error> {
        let backend = self.backend;
        self.subscribe_on_surface(
            backend.events().start,
            self.handler(move |listeners, event| listeners.handle_start(backend, event)),
        )?;

        self.subscribe_on_surface(
            DRAG_START_EVENT,
            Rc::new(|event: &RawEvent| event.prevent_default()),
        )?;

        if let Some(secondary) = secondary_start_backend(backend, self.config.mouse) {
            self.subscribe_on_surface(
                secondary.events().start,
                self.handler(move |listeners, event| listeners.handle_start(secondary, event)),
            )?;
        }

        self.subscribe_on_surface(CLICK_EVENT, self.handler(Self::handle_click))
    }

    fn subscribe_on_surface(&self, event: &'static str, handler: EventHandler) -> Result<(), H::Error> {
        let id = self.host.subscribe(&self.surface, event, handler)?;
        self.surface_subscriptions.borrow_mut().push(id);
        Ok(())
    }

    fn subscribe_session(&self, backend: Backend) {
        let document = self.host.document();
        let events = backend.events();
        let mut acquired = Vec::new();
        for name in events.session_scope() {
            let handler = if name == events.moved {
                self.handler(Self::handle_move)
            } else {
                self.handler(Self::handle_end)
            };
            match self.host.subscribe(&document, name, handler) {
                Ok(id) => acquired.push(id),
                Err(err) => warn!("failed to subscribe {name} for a live session: {err}"),
            }
        }
        self.session_subscriptions.borrow_mut().extend(acquired);
    }

    fn release_session_listeners(&self) {
        let subscriptions = std::mem::take(&mut *self.session_subscriptions.borrow_mut());
        for id in subscriptions.into_iter().rev() {
            self.host.unsubscribe(id);
        }
    }

    fn handle_start(&self, backend: Backend, event: &RawEvent) {
        let emission = self.engine.borrow_mut().start(backend, event);
        let Some(Emission::Start(start)) = emission else {
            return;
        };
        self.release_session_listeners();
        self.subscribe_session(backend);
        (self.config.start_callback())(event, start);
    }

    fn handle_move(&self, event: &RawEvent) {
        let emission = self.engine.borrow_mut().moved(event);
        if let Some(Emission::Move {
            start,
            displacement,
            velocity,
        }) = emission
        {
            (self.config.move_callback())(event, start, displacement, velocity);
        }
    }

    fn handle_end(&self, event: &RawEvent) {
        let emission = self.engine.borrow_mut().end(event);
        if let Some(Emission::End {
            start,
            displacement,
            velocity,
        }) = emission
        {
            self.release_session_listeners();
            (self.config.end_callback())(event, start, displacement, velocity);
        }
    }

    fn handle_click(&self, event: &RawEvent) {
        let emission = self.engine.borrow().click(event);
        if emission == Some(Emission::Click) {
            (self.config.click_callback())(event);
        }
    }

    fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        self.release_session_listeners();
        let subscriptions = std::mem::take(&mut *self.surface_subscriptions.borrow_mut());
        for id in subscriptions.into_iter().rev() {
            self.host.unsubscribe(id);
        }
        self.engine.borrow_mut().abandon();
        debug!("{:?} gesture listeners released", self.backend);
    }
}

/// Owner of an attached gesture engine.
///
/// Dropping the handle destroys it, like [`GestureHandle::destroy`].
pub struct GestureHandle<H: EventHost + 'static> {
    inner: Rc<Listeners<H>>,
}

impl<H: EventHost + 'static> GestureHandle<H> {
    /// Selects the backend for `host` and subscribes the surface listeners.
    ///
    /// On failure every subscription acquired so far is released again.
    pub fn attach(host: H, surface: H::Target, config: GestureConfig) -> Result<Self, H::Error> {
        let backend = select_backend(host.capabilities());
        let config = Rc::new(config);
        let engine = GestureEngine::new(Rc::clone(&config));
        let clicks_allowed = engine.clicks_allowed_flag();

        let inner = Rc::new_cyclic(|this| Listeners {
            this: this.clone(),
            host,
            surface,
            backend,
            config,
            engine: RefCell::new(engine),
            clicks_allowed,
            surface_subscriptions: RefCell::new(Vec::new()),
            session_subscriptions: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
        });

        let handle = Self { inner };
        handle.inner.subscribe_surface()?;
        debug!("gesture engine attached with {backend:?} backend");
        Ok(handle)
    }

    pub fn backend(&self) -> Backend {
        self.inner.backend
    }

    pub fn are_clicks_allowed(&self) -> bool {
        self.inner.clicks_allowed.get()
    }

    pub fn state(&self) -> GestureState {
        self.inner.engine.borrow().state()
    }

    pub fn host(&self) -> &H {
        &self.inner.host
    }

    /// Number of native listeners currently held (surface and session).
    pub fn subscription_count(&self) -> usize {
        self.inner.surface_subscriptions.borrow().len()
            + self.inner.session_subscriptions.borrow().len()
    }

    /// Cheap, clonable access for callbacks that need to query or tear down
    /// the engine they are called from.
    pub fn controller(&self) -> GestureController<H> {
        GestureController {
            inner: Rc::downgrade(&self.inner),
            clicks_allowed: Rc::clone(&self.inner.clicks_allowed),
        }
    }

    /// Removes every listener. A live session is abandoned without an end
    /// callback. Further calls are no-ops.
    pub fn destroy(&self) {
        self.inner.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.get()
    }
}

impl<H: EventHost + 'static> Drop for GestureHandle<H> {
    fn drop(&mut self) {
        self.inner.destroy();
    }
}

pub struct GestureController<H: EventHost + 'static> {
    inner: Weak<Listeners<H>>,
    clicks_allowed: Rc<Cell<bool>>,
}

impl<H: EventHost + 'static> Clone for GestureController<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            clicks_allowed: Rc::clone(&self.clicks_allowed),
        }
    }
}

impl<H: EventHost + 'static> GestureController<H> {
    /// Last known click flag; stays readable after the handle is gone.
    pub fn are_clicks_allowed(&self) -> bool {
        self.clicks_allowed.get()
    }

    pub fn destroy(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.destroy();
        }
    }
}
