//! Per-backend admission filter.
//!
//! A pure predicate run on every start and move event before it may touch
//! session state. End and cancel events bypass it so that a live session can
//! always be closed.

use crate::backend::Backend;
use crate::config::GestureConfig;
use crate::event::RawEvent;

pub fn admit(backend: Backend, event: &RawEvent, config: &GestureConfig) -> bool {
    match backend {
        Backend::Touch => admit_touch(event),
        Backend::Pointer | Backend::LegacyPointer => admit_pointer(event, config.mouse),
        Backend::Mouse => admit_mouse(event),
    }
}

/// Multi-touch frames and pinch moves are not single-pointer drags.
fn admit_touch(event: &RawEvent) -> bool {
    let multi_touch = event.touch_count.is_some_and(|count| count > 1);
    let pinching = event.scale.is_some_and(|scale| scale != 1.0);
    !(multi_touch || pinching)
}

fn admit_pointer(event: &RawEvent, mouse: bool) -> bool {
    if !event.is_primary || event.buttons.has_non_primary() {
        return false;
    }
    mouse || event.pointer_type.is_some_and(|kind| kind.is_touch_or_pen())
}

fn admit_mouse(event: &RawEvent) -> bool {
    !event.buttons.has_non_primary()
}
