//! Gesture engine configuration.

use std::fmt;
use std::rc::Rc;
use unipointer_geometry::{Offset, Velocity};

use crate::clock::{Clock, MonotonicClock};
use crate::event::RawEvent;
use crate::gesture_constants::DEFAULT_CLICK_TOLERANCE;
use crate::session::SessionStart;

pub type StartCallback = Rc<dyn Fn(&RawEvent, SessionStart)>;
pub type MotionCallback = Rc<dyn Fn(&RawEvent, SessionStart, Offset, Velocity)>;
pub type ClickCallback = Rc<dyn Fn(&RawEvent)>;

/// When a start event resets the click flag relative to its admission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClickReset {
    /// Only admitted starts re-allow clicks.
    #[default]
    AfterAdmission,
    /// Every start re-allows clicks, even one the filter then rejects
    /// (e.g. a second finger landing mid-drag).
    BeforeAdmission,
}

/// Configuration for one gesture engine instance.
///
/// Build it from [`GestureConfig::default`] with the `with_*` and `on_*`
/// methods; it is immutable once attached.
#[derive(Clone)]
pub struct GestureConfig {
    /// Suppress native default actions (scrolling, text selection, image
    /// dragging) on accepted moves and on non-touch starts.
    pub prevent_default: bool,
    /// Movement in logical pixels a session may make and still count as a click.
    pub click_tolerance: f32,
    /// Disables handing vertical gestures over to native scrolling.
    pub prevent_scroll: bool,
    /// Honor mouse input: mouse presses under the touch backend, and mouse
    /// pointer types under the pointer backends.
    pub mouse: bool,
    pub click_reset: ClickReset,
    clock: Rc<dyn Clock>,
    on_start: StartCallback,
    on_move: MotionCallback,
    on_end: MotionCallback,
    on_click: ClickCallback,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            prevent_default: true,
            click_tolerance: DEFAULT_CLICK_TOLERANCE,
            prevent_scroll: false,
            mouse: true,
            click_reset: ClickReset::default(),
            clock: Rc::new(MonotonicClock::new()),
            on_start: Rc::new(|_, _| {}),
            on_move: Rc::new(|_, _, _, _| {}),
            on_end: Rc::new(|_, _, _, _| {}),
            on_click: Rc::new(|_| {}),
        }
    }
}

impl GestureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prevent_default(mut self, prevent_default: bool) -> Self {
        self.prevent_default = prevent_default;
        self
    }

    pub fn with_click_tolerance(mut self, click_tolerance: f32) -> Self {
        self.click_tolerance = click_tolerance;
        self
    }

    pub fn with_prevent_scroll(mut self, prevent_scroll: bool) -> Self {
        self.prevent_scroll = prevent_scroll;
        self
    }

    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    pub fn with_click_reset(mut self, click_reset: ClickReset) -> Self {
        self.click_reset = click_reset;
        self
    }

    /// Replace the time source (tests drive sessions with a manual clock).
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self
    }

    pub fn on_start(mut self, callback: impl Fn(&RawEvent, SessionStart) + 'static) -> Self {
        self.on_start = Rc::new(callback);
        self
    }

    pub fn on_move(
        mut self,
        callback: impl Fn(&RawEvent, SessionStart, Offset, Velocity) + 'static,
    ) -> Self {
        self.on_move = Rc::new(callback);
        self
    }

    pub fn on_end(
        mut self,
        callback: impl Fn(&RawEvent, SessionStart, Offset, Velocity) + 'static,
    ) -> Self {
        self.on_end = Rc::new(callback);
        self
    }

    pub fn on_click(mut self, callback: impl Fn(&RawEvent) + 'static) -> Self {
        self.on_click = Rc::new(callback);
        self
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn start_callback(&self) -> StartCallback {
        Rc::clone(&self.on_start)
    }

    pub(crate) fn move_callback(&self) -> MotionCallback {
        Rc::clone(&self.on_move)
    }

    pub(crate) fn end_callback(&self) -> MotionCallback {
        Rc::clone(&self.on_end)
    }

    pub(crate) fn click_callback(&self) -> ClickCallback {
        Rc::clone(&self.on_click)
    }
}

impl fmt::Debug for GestureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureConfig")
            .field("prevent_default", &self.prevent_default)
            .field("click_tolerance", &self.click_tolerance)
            .field("prevent_scroll", &self.prevent_scroll)
            .field("mouse", &self.mouse)
            .field("click_reset", &self.click_reset)
            .finish_non_exhaustive()
    }
}
