//! Input backend selection.
//!
//! Exactly one backend is active per engine instance. Native pointer events
//! win over the legacy (vendor-prefixed) pointer events, which win over the
//! touch fallback. Under the touch fallback, mouse presses may additionally
//! start sessions of their own.

use log::debug;

pub const CLICK_EVENT: &str = "click";
pub const DRAG_START_EVENT: &str = "dragstart";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    Touch,
    Pointer,
    LegacyPointer,
    Mouse,
}

/// Native event names of one backend's session lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionEvents {
    pub start: &'static str,
    pub moved: &'static str,
    pub end: &'static str,
    /// Mouse input has no cancel event.
    pub cancel: Option<&'static str>,
}

impl SessionEvents {
    /// Move, end and cancel names: the listeners attached for a live session.
    pub fn session_scope(&self) -> impl Iterator<Item = &'static str> {
        [Some(self.moved), Some(self.end), self.cancel]
            .into_iter()
            .flatten()
    }
}

const TOUCH_EVENTS: SessionEvents = SessionEvents {
    start: "touchstart",
    moved: "touchmove",
    end: "touchend",
    cancel: Some("touchcancel"),
};

const POINTER_EVENTS: SessionEvents = SessionEvents {
    start: "pointerdown",
    moved: "pointermove",
    end: "pointerup",
    cancel: Some("pointercancel"),
};

const LEGACY_POINTER_EVENTS: SessionEvents = SessionEvents {
    start: "MSPointerDown",
    moved: "MSPointerMove",
    end: "MSPointerUp",
    cancel: Some("MSPointerCancel"),
};

const MOUSE_EVENTS: SessionEvents = SessionEvents {
    start: "mousedown",
    moved: "mousemove",
    end: "mouseup",
    cancel: None,
};

impl Backend {
    pub const ALL: [Backend; 4] = [
        Backend::Touch,
        Backend::Pointer,
        Backend::LegacyPointer,
        Backend::Mouse,
    ];

    pub const fn events(self) -> SessionEvents {
        match self {
            Backend::Touch => TOUCH_EVENTS,
            Backend::Pointer => POINTER_EVENTS,
            Backend::LegacyPointer => LEGACY_POINTER_EVENTS,
            Backend::Mouse => MOUSE_EVENTS,
        }
    }

    pub fn is_touch(self) -> bool {
        self == Backend::Touch
    }

    pub fn is_mouse(self) -> bool {
        self == Backend::Mouse
    }

    /// Whether end events report where the tracked pointer lifted. Touch end
    /// events only list the contacts still down; mouse ends keep the last move.
    pub fn end_reports_release_position(self) -> bool {
        matches!(self, Backend::Pointer | Backend::LegacyPointer)
    }
}

/// Environment probe results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Standard pointer events are available.
    pub pointer_events: bool,
    /// Vendor-prefixed pointer events (`MSPointer*`) are available.
    pub legacy_pointer_events: bool,
}

impl Capabilities {
    pub const TOUCH_ONLY: Capabilities = Capabilities {
        pointer_events: false,
        legacy_pointer_events: false,
    };

    pub const POINTER: Capabilities = Capabilities {
        pointer_events: true,
        legacy_pointer_events: false,
    };

    pub const LEGACY_POINTER: Capabilities = Capabilities {
        pointer_events: false,
        legacy_pointer_events: true,
    };
}

pub fn select_backend(capabilities: Capabilities) -> Backend {
    let backend = if capabilities.pointer_events {
        Backend::Pointer
    } else if capabilities.legacy_pointer_events {
        Backend::LegacyPointer
    } else {
        Backend::Touch
    };
    debug!("selected {backend:?} input backend for {capabilities:?}");
    backend
}

/// Backend bound as an additional start trigger next to the selected one.
pub fn secondary_start_backend(selected: Backend, mouse: bool) -> Option<Backend> {
    (selected.is_touch() && mouse).then_some(Backend::Mouse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_take_priority() {
        let both = Capabilities {
            pointer_events: true,
            legacy_pointer_events: true,
        };
        assert_eq!(select_backend(both), Backend::Pointer);
        assert_eq!(
            select_backend(Capabilities::LEGACY_POINTER),
            Backend::LegacyPointer
        );
        assert_eq!(select_backend(Capabilities::TOUCH_ONLY), Backend::Touch);
    }

    #[test]
    fn mouse_is_secondary_only_for_touch() {
        assert_eq!(
            secondary_start_backend(Backend::Touch, true),
            Some(Backend::Mouse)
        );
        assert_eq!(secondary_start_backend(Backend::Touch, false), None);
        assert_eq!(secondary_start_backend(Backend::Pointer, true), None);
        assert_eq!(secondary_start_backend(Backend::LegacyPointer, true), None);
    }

    #[test]
    fn only_pointer_ends_report_release_position() {
        assert!(Backend::Pointer.end_reports_release_position());
        assert!(Backend::LegacyPointer.end_reports_release_position());
        assert!(!Backend::Touch.end_reports_release_position());
        assert!(!Backend::Mouse.end_reports_release_position());
    }

    #[test]
    fn mouse_session_scope_has_no_cancel() {
        let names: Vec<_> = Backend::Mouse.events().session_scope().collect();
        assert_eq!(names, vec!["mousemove", "mouseup"]);

        let names: Vec<_> = Backend::Pointer.events().session_scope().collect();
        assert_eq!(names, vec!["pointermove", "pointerup", "pointercancel"]);
    }
}
