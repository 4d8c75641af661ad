use std::cell::Cell;
use std::rc::Rc;
use unipointer_geometry::Point;

use crate::backend::{Backend, CLICK_EVENT, DRAG_START_EVENT};

/// Logical role of a raw event inside a drag session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawEventKind {
    Start,
    Move,
    End,
    Cancel,
    Click,
    DragStart,
}

impl RawEventKind {
    /// Maps a native event name to its logical role, if the name belongs to
    /// any backend table or to the click/dragstart listeners.
    pub fn from_event_name(name: &str) -> Option<Self> {
        if name == CLICK_EVENT {
            return Some(RawEventKind::Click);
        }
        if name == DRAG_START_EVENT {
            return Some(RawEventKind::DragStart);
        }
        Backend::ALL.iter().find_map(|backend| {
            let events = backend.events();
            if events.start == name {
                Some(RawEventKind::Start)
            } else if events.moved == name {
                Some(RawEventKind::Move)
            } else if events.end == name {
                Some(RawEventKind::End)
            } else if events.cancel == Some(name) {
                Some(RawEventKind::Cancel)
            } else {
                None
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerType {
    Touch,
    Pen,
    Mouse,
    Other,
}

impl PointerType {
    /// Parses the `pointerType` string reported by pointer events.
    pub fn from_name(name: &str) -> Self {
        match name {
            "touch" => PointerType::Touch,
            "pen" => PointerType::Pen,
            "mouse" => PointerType::Mouse,
            _ => PointerType::Other,
        }
    }

    /// Legacy pointer events report numeric types (2 touch, 3 pen, 4 mouse).
    pub fn from_legacy_code(code: u32) -> Self {
        match code {
            2 => PointerType::Touch,
            3 => PointerType::Pen,
            4 => PointerType::Mouse,
            _ => PointerType::Other,
        }
    }

    pub fn is_touch_or_pen(&self) -> bool {
        matches!(self, PointerType::Touch | PointerType::Pen)
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

/// Pressed-buttons bitmask, laid out like the DOM `buttons` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerButtons(u16);

impl PointerButtons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }

    /// An empty mask means the platform did not report buttons at all
    /// (or reported the primary button as 0, as some engines do).
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when something other than exactly the primary button is pressed.
    pub fn has_non_primary(&self) -> bool {
        !self.is_empty() && *self != Self::PRIMARY
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Default)]
struct EventEffects {
    default_prevented: Cell<bool>,
    blur_requested: Cell<bool>,
}

/// Host-neutral view of a native input event.
///
/// Hosts translate their native events into `RawEvent`s before handing them
/// to the engine. Side effects requested by the engine (suppressing the
/// default action, removing focus from the target) are recorded on the event
/// and shared across clones via `Rc`, so the host can apply them to the native
/// event once dispatch returns.
#[derive(Clone, Debug)]
pub struct RawEvent {
    pub kind: RawEventKind,
    /// Client position; for touch events the first active contact.
    pub position: Option<Point>,
    /// Number of simultaneous touch contacts, touch events only.
    pub touch_count: Option<usize>,
    /// Gesture scale reported by some touch platforms during pinches.
    pub scale: Option<f32>,
    pub is_primary: bool,
    pub buttons: PointerButtons,
    pub pointer_type: Option<PointerType>,
    effects: Rc<EventEffects>,
}

impl RawEvent {
    pub fn new(kind: RawEventKind, position: Option<Point>) -> Self {
        Self {
            kind,
            position,
            touch_count: None,
            scale: None,
            is_primary: true,
            buttons: PointerButtons::NONE,
            pointer_type: None,
            effects: Rc::new(EventEffects::default()),
        }
    }

    /// Touch event whose first contact sits at `position`.
    pub fn touch(kind: RawEventKind, position: Option<Point>, touch_count: usize) -> Self {
        let mut event = Self::new(kind, position);
        event.touch_count = Some(touch_count);
        event
    }

    /// Pointer event (native or legacy) from a primary pointer.
    pub fn pointer(kind: RawEventKind, position: Point, pointer_type: PointerType) -> Self {
        let mut event = Self::new(kind, Some(position));
        event.pointer_type = Some(pointer_type);
        event
    }

    pub fn mouse(kind: RawEventKind, position: Point) -> Self {
        Self::new(kind, Some(position))
    }

    pub fn click() -> Self {
        Self::new(RawEventKind::Click, None)
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_primary(mut self, is_primary: bool) -> Self {
        self.is_primary = is_primary;
        self
    }

    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = Some(pointer_type);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Asks the host to suppress the native default action (scrolling,
    /// link navigation, text selection).
    pub fn prevent_default(&self) {
        self.effects.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.effects.default_prevented.get()
    }

    /// Asks the host to remove focus from the event target if it can.
    pub fn request_blur(&self) {
        self.effects.blur_requested.set(true);
    }

    pub fn is_blur_requested(&self) -> bool {
        self.effects.blur_requested.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_are_shared_between_copies() {
        let event = RawEvent::mouse(RawEventKind::Move, Point::new(1.0, 2.0));
        let copy = event.clone();
        copy.prevent_default();
        assert!(event.is_default_prevented());
        assert!(!event.is_blur_requested());
        event.request_blur();
        assert!(copy.is_blur_requested());
    }

    #[test]
    fn buttons_mask_matches_dom_layout() {
        let primary = PointerButtons::new().with(PointerButton::Primary);
        assert_eq!(primary, PointerButtons::PRIMARY);
        assert!(!primary.has_non_primary());

        let chord = primary.with(PointerButton::Secondary);
        assert_eq!(chord.bits(), 3);
        assert!(chord.has_non_primary());

        assert!(!PointerButtons::NONE.has_non_primary());
        assert!(PointerButtons::from_bits(4).contains(PointerButton::Middle));
    }

    #[test]
    fn event_names_map_to_roles() {
        assert_eq!(
            RawEventKind::from_event_name("touchstart"),
            Some(RawEventKind::Start)
        );
        assert_eq!(
            RawEventKind::from_event_name("MSPointerMove"),
            Some(RawEventKind::Move)
        );
        assert_eq!(
            RawEventKind::from_event_name("pointercancel"),
            Some(RawEventKind::Cancel)
        );
        assert_eq!(
            RawEventKind::from_event_name("mouseup"),
            Some(RawEventKind::End)
        );
        assert_eq!(
            RawEventKind::from_event_name("click"),
            Some(RawEventKind::Click)
        );
        assert_eq!(RawEventKind::from_event_name("wheel"), None);
    }

    #[test]
    fn pointer_types() {
        assert_eq!(PointerType::from_name("pen"), PointerType::Pen);
        assert_eq!(PointerType::from_name("kinect"), PointerType::Other);
        assert_eq!(PointerType::from_legacy_code(2), PointerType::Touch);
        assert!(PointerType::from_legacy_code(3).is_touch_or_pen());
        assert!(!PointerType::Mouse.is_touch_or_pen());
    }
}
