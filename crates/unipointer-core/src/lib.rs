//! Pointer input unification for Unipointer
//!
//! Turns touch, pointer, legacy pointer and mouse events on a surface into a
//! single `start`/`move`/`end`/`click` gesture stream with displacement and
//! velocity, independent of the backend that produced them.

pub mod admission;
pub mod backend;
pub mod clock;
pub mod collections;
pub mod config;
pub mod engine;
pub mod event;
pub mod gesture_constants;
pub mod handle;
pub mod host;
pub mod session;
pub mod velocity_tracker;

pub use admission::admit;
pub use backend::{
    secondary_start_backend, select_backend, Backend, Capabilities, SessionEvents, CLICK_EVENT,
    DRAG_START_EVENT,
};
pub use clock::{Clock, MonotonicClock};
pub use config::{ClickReset, GestureConfig};
pub use engine::{Emission, GestureEngine, GestureState};
pub use event::{PointerButton, PointerButtons, PointerType, RawEvent, RawEventKind};
pub use handle::{GestureController, GestureHandle};
pub use host::{EventHandler, EventHost, SubscriptionId};
pub use session::{ScrollIntent, Session, SessionStart};
pub use unipointer_geometry::{Offset, Point, Velocity};
pub use velocity_tracker::{DisplacementSample, SampleHistory};

pub mod prelude {
    pub use crate::backend::{Backend, Capabilities};
    pub use crate::config::{ClickReset, GestureConfig};
    pub use crate::event::{PointerButtons, PointerType, RawEvent, RawEventKind};
    pub use crate::handle::{GestureController, GestureHandle};
    pub use crate::host::{EventHost, SubscriptionId};
    pub use crate::session::SessionStart;
    pub use unipointer_geometry::prelude::*;
}
