//! Robot-style driver for gesture engine tests
//!
//! The robot attaches a real [`GestureHandle`] to a [`ScriptedHost`], drives
//! it with backend-appropriate raw events and records every normalized
//! gesture the engine emits.
//!
//! # Example
//!
//! ```
//! use unipointer_core::GestureConfig;
//! use unipointer_testing::GestureRobot;
//!
//! let robot = GestureRobot::touch(GestureConfig::default());
//! robot.press(0.0, 0.0);
//! robot.advance(10.0);
//! robot.move_to(20.0, 2.0);
//! robot.release(20.0, 2.0);
//!
//! assert_eq!(robot.recorder().moves().len(), 1);
//! assert!(!robot.handle().are_clicks_allowed());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use unipointer_core::{
    Backend, GestureConfig, GestureHandle, PointerButtons, PointerType, RawEvent, RawEventKind,
    SessionStart,
};
use unipointer_geometry::{Offset, Point, Velocity};

use crate::clock::ManualClock;
use crate::host::{ScriptTarget, ScriptedHost};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedGesture {
    Start(SessionStart),
    Move {
        start: SessionStart,
        displacement: Offset,
        velocity: Velocity,
    },
    End {
        start: SessionStart,
        displacement: Offset,
        velocity: Velocity,
    },
    Click,
}

/// Collects the callbacks of a [`GestureConfig`].
#[derive(Clone, Default)]
pub struct GestureRecorder {
    events: Rc<RefCell<Vec<RecordedGesture>>>,
}

impl GestureRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `config` with all four callbacks recording into this recorder.
    pub fn install(&self, config: GestureConfig) -> GestureConfig {
        let on_start = Rc::clone(&self.events);
        let on_move = Rc::clone(&self.events);
        let on_end = Rc::clone(&self.events);
        let on_click = Rc::clone(&self.events);
        config
            .on_start(move |_, start| on_start.borrow_mut().push(RecordedGesture::Start(start)))
            .on_move(move |_, start, displacement, velocity| {
                on_move.borrow_mut().push(RecordedGesture::Move {
                    start,
                    displacement,
                    velocity,
                })
            })
            .on_end(move |_, start, displacement, velocity| {
                on_end.borrow_mut().push(RecordedGesture::End {
                    start,
                    displacement,
                    velocity,
                })
            })
            .on_click(move |_| on_click.borrow_mut().push(RecordedGesture::Click))
    }

    pub fn events(&self) -> Vec<RecordedGesture> {
        self.events.borrow().clone()
    }

    pub fn starts(&self) -> Vec<SessionStart> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedGesture::Start(start) => Some(*start),
                _ => None,
            })
            .collect()
    }

    pub fn moves(&self) -> Vec<(Offset, Velocity)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedGesture::Move {
                    displacement,
                    velocity,
                    ..
                } => Some((*displacement, *velocity)),
                _ => None,
            })
            .collect()
    }

    pub fn ends(&self) -> Vec<(Offset, Velocity)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RecordedGesture::End {
                    displacement,
                    velocity,
                    ..
                } => Some((*displacement, *velocity)),
                _ => None,
            })
            .collect()
    }

    pub fn click_count(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, RecordedGesture::Click))
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Drives one attached gesture engine.
pub struct GestureRobot {
    host: ScriptedHost,
    clock: ManualClock,
    recorder: GestureRecorder,
    handle: GestureHandle<ScriptedHost>,
    pointer_type: PointerType,
}

impl GestureRobot {
    /// Attaches an engine configured with `config` (callbacks are replaced by
    /// the recorder, the clock by a manual clock starting at zero).
    pub fn new(host: ScriptedHost, config: GestureConfig) -> Self {
        let clock = ManualClock::new();
        let recorder = GestureRecorder::new();
        let config = recorder.install(config.with_clock(clock.clone()));
        let handle = match GestureHandle::attach(host.clone(), ScriptTarget::Surface, config) {
            Ok(handle) => handle,
            Err(never) => match never {},
        };
        Self {
            host,
            clock,
            recorder,
            handle,
            pointer_type: PointerType::Touch,
        }
    }

    pub fn touch(config: GestureConfig) -> Self {
        Self::new(ScriptedHost::touch_only(), config)
    }

    pub fn pointer(config: GestureConfig) -> Self {
        Self::new(ScriptedHost::pointer_events(), config)
    }

    pub fn legacy_pointer(config: GestureConfig) -> Self {
        Self::new(ScriptedHost::legacy_pointer_events(), config)
    }

    /// Pointer type reported by pointer-backend events (touch by default).
    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    pub fn backend(&self) -> Backend {
        self.handle.backend()
    }

    pub fn handle(&self) -> &GestureHandle<ScriptedHost> {
        &self.handle
    }

    pub fn host(&self) -> &ScriptedHost {
        &self.host
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn recorder(&self) -> &GestureRecorder {
        &self.recorder
    }

    pub fn advance(&self, ms: f64) {
        self.clock.advance(ms);
    }

    /// Builds the event the selected backend would deliver for `kind`.
    pub fn event(&self, kind: RawEventKind, x: f32, y: f32) -> RawEvent {
        self.event_for(self.backend(), kind, Point::new(x, y))
    }

    fn event_for(&self, backend: Backend, kind: RawEventKind, position: Point) -> RawEvent {
        let pressed = matches!(kind, RawEventKind::Start | RawEventKind::Move);
        let buttons = if pressed {
            PointerButtons::PRIMARY
        } else {
            PointerButtons::NONE
        };
        match backend {
            Backend::Touch if pressed => RawEvent::touch(kind, Some(position), 1),
            // The lifted contact is no longer listed in `touches`.
            Backend::Touch => RawEvent::touch(kind, None, 0),
            Backend::Pointer | Backend::LegacyPointer => {
                RawEvent::pointer(kind, position, self.pointer_type).with_buttons(buttons)
            }
            Backend::Mouse => RawEvent::mouse(kind, position).with_buttons(buttons),
        }
    }

    fn name_for(backend: Backend, kind: RawEventKind) -> &'static str {
        let events = backend.events();
        match kind {
            RawEventKind::Start => events.start,
            RawEventKind::Move => events.moved,
            RawEventKind::End => events.end,
            RawEventKind::Cancel => events.cancel.unwrap_or(events.end),
            RawEventKind::Click => unipointer_core::CLICK_EVENT,
            RawEventKind::DragStart => unipointer_core::DRAG_START_EVENT,
        }
    }

    fn send(&self, backend: Backend, kind: RawEventKind, x: f32, y: f32) -> RawEvent {
        let event = self.event_for(backend, kind, Point::new(x, y));
        let target = if kind == RawEventKind::Start {
            ScriptTarget::Surface
        } else {
            ScriptTarget::Document
        };
        self.host.dispatch(target, Self::name_for(backend, kind), &event);
        event
    }

    pub fn press(&self, x: f32, y: f32) -> RawEvent {
        self.send(self.backend(), RawEventKind::Start, x, y)
    }

    pub fn move_to(&self, x: f32, y: f32) -> RawEvent {
        self.send(self.backend(), RawEventKind::Move, x, y)
    }

    pub fn release(&self, x: f32, y: f32) -> RawEvent {
        self.send(self.backend(), RawEventKind::End, x, y)
    }

    pub fn cancel(&self) -> RawEvent {
        self.send(self.backend(), RawEventKind::Cancel, 0.0, 0.0)
    }

    pub fn mouse_press(&self, x: f32, y: f32) -> RawEvent {
        self.send(Backend::Mouse, RawEventKind::Start, x, y)
    }

    pub fn mouse_move_to(&self, x: f32, y: f32) -> RawEvent {
        self.send(Backend::Mouse, RawEventKind::Move, x, y)
    }

    pub fn mouse_release(&self, x: f32, y: f32) -> RawEvent {
        self.send(Backend::Mouse, RawEventKind::End, x, y)
    }

    /// Native click on the surface, as browsers fire after a release.
    pub fn click(&self) -> RawEvent {
        let event = RawEvent::click();
        self.host
            .dispatch(ScriptTarget::Surface, unipointer_core::CLICK_EVENT, &event);
        event
    }

    /// Dispatches a hand-built event.
    pub fn dispatch(&self, target: ScriptTarget, name: &str, event: &RawEvent) -> usize {
        self.host.dispatch(target, name, event)
    }

    /// Press, `steps` evenly spaced moves `step_ms` apart, release.
    pub fn drag(&self, from: Point, to: Point, steps: usize, step_ms: f64) {
        self.press(from.x, from.y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            self.advance(step_ms);
            self.move_to(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            );
        }
        self.release(to.x, to.y);
    }

    pub fn destroy(&self) {
        self.handle.destroy();
    }
}
