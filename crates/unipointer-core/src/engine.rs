//! Drag session state machine.
//!
//! ```text
//! Idle --admitted start--> Tracking --vertical first move--> ScrollYielded
//!   ^                         |                                   |
//!   +-------- end/cancel -----+-------------- end/cancel ---------+
//! ```
//!
//! The engine never invokes callbacks itself: every transition returns the
//! [`Emission`] the caller should forward, which lets the listener layer
//! release its borrow of the engine before user code runs.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, trace};
use unipointer_geometry::{Offset, Velocity};

use crate::admission::admit;
use crate::backend::Backend;
use crate::config::{ClickReset, GestureConfig};
use crate::event::RawEvent;
use crate::session::{ScrollIntent, Session, SessionStart};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Tracking,
    ScrollYielded,
}

/// Normalized gesture output of one raw event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Emission {
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

pub struct GestureEngine {
    config: Rc<GestureConfig>,
    clicks_allowed: Rc<Cell<bool>>,
    state: GestureState,
    session: Option<Session>,
}

impl GestureEngine {
    pub fn new(config: Rc<GestureConfig>) -> Self {
        Self {
            config,
            clicks_allowed: Rc::new(Cell::new(true)),
            state: GestureState::Idle,
            session: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Flag of the most recent admitted session (or of the rejected start
    /// under [`ClickReset::BeforeAdmission`]).
    pub fn clicks_allowed(&self) -> bool {
        self.clicks_allowed.get()
    }

    /// Shared view of the click flag, readable while the engine is borrowed.
    pub fn clicks_allowed_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.clicks_allowed)
    }

    /// Handles a start event from `backend`. A start while a session is live
    /// replaces it without emitting an end.
    pub fn start(&mut self, backend: Backend, event: &RawEvent) -> Option<Emission> {
        if self.config.click_reset == ClickReset::BeforeAdmission {
            self.clicks_allowed.set(true);
        }

        if !admit(backend, event, &self.config) {
            trace!("{backend:?} start rejected by admission filter");
            return None;
        }
        let Some(position) = event.position else {
            trace!("{backend:?} start without a position ignored");
            return None;
        };

        self.clicks_allowed.set(true);

        if self.config.prevent_default && !backend.is_touch() {
            event.prevent_default();
        }

        if self.session.is_some() {
            debug!("{backend:?} start replaces a live session");
        }
        let session = Session::new(backend, position, self.config.clock().now_ms());
        let start = session.start();
        self.session = Some(session);
        self.state = GestureState::Tracking;
        debug!("session started at {position:?} via {backend:?}");

        Some(Emission::Start(start))
    }

    pub fn moved(&mut self, event: &RawEvent) -> Option<Emission> {
        if self.state != GestureState::Tracking {
            return None;
        }
        let session = self.session.as_mut()?;
        let backend = session.backend();

        if !admit(backend, event, &self.config) {
            trace!("{backend:?} move rejected by admission filter");
            return None;
        }
        let position = event.position?;

        let (displacement, velocity) = session.update(position, self.config.clock().now_ms());

        if displacement.max_abs() > self.config.click_tolerance {
            self.clicks_allowed.set(false);
        }

        if session.scroll_intent() == ScrollIntent::Undetermined && !backend.is_mouse() {
            let yielding = displacement.is_mostly_vertical() && !self.config.prevent_scroll;
            if session.resolve_scroll_intent(yielding) == ScrollIntent::Yielding {
                debug!("vertical gesture {displacement:?} yielded to native scrolling");
                self.state = GestureState::ScrollYielded;
                return None;
            }
        }

        if self.config.prevent_default {
            event.prevent_default();
        }

        Some(Emission::Move {
            start: session.start(),
            displacement,
            velocity,
        })
    }

    /// Handles end and cancel events alike. Always admitted.
    pub fn end(&mut self, event: &RawEvent) -> Option<Emission> {
        let mut session = self.session.take()?;
        self.state = GestureState::Idle;

        if session.backend().end_reports_release_position() {
            if let Some(position) = event.position {
                session.update(position, self.config.clock().now_ms());
            }
        }

        if !self.clicks_allowed.get() {
            event.request_blur();
        }

        debug!(
            "session ended with displacement {:?} after {}ms",
            session.displacement(),
            session.elapsed_ms()
        );

        Some(Emission::End {
            start: session.start(),
            displacement: session.displacement(),
            velocity: session.velocity(),
        })
    }

    /// Lets a native click through, or suppresses it after a drag.
    pub fn click(&self, event: &RawEvent) -> Option<Emission> {
        if self.clicks_allowed.get() {
            return Some(Emission::Click);
        }
        trace!("click suppressed after drag");
        event.prevent_default();
        event.request_blur();
        None
    }

    /// Drops any live session without emitting an end.
    pub fn abandon(&mut self) {
        if self.session.take().is_some() {
            debug!("live session abandoned");
        }
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::event::{PointerType, RawEventKind};
    use unipointer_geometry::Point;

    #[derive(Clone, Default)]
    struct StepClock(Rc<Cell<f64>>);

    impl Clock for StepClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    fn new_engine(config: GestureConfig) -> (GestureEngine, StepClock) {
        let clock = StepClock::default();
        let config = config.with_clock(clock.clone());
        (GestureEngine::new(Rc::new(config)), clock)
    }

    fn touch(kind: RawEventKind, x: f32, y: f32) -> RawEvent {
        RawEvent::touch(kind, Some(Point::new(x, y)), 1)
    }

    #[test]
    fn horizontal_drag_emits_moves() {
        let (mut engine, clock) = new_engine(GestureConfig::default());
        assert!(engine
            .start(Backend::Touch, &touch(RawEventKind::Start, 0.0, 0.0))
            .is_some());
        assert_eq!(engine.state(), GestureState::Tracking);

        clock.0.set(10.0);
        let event = touch(RawEventKind::Move, 2.0, 1.0);
        let emission = engine.moved(&event);
        assert_eq!(
            emission,
            Some(Emission::Move {
                start: SessionStart {
                    position: Point::ZERO,
                    time_ms: 0.0
                },
                displacement: Offset::new(2.0, 1.0),
                velocity: Velocity::new(0.2, 0.1),
            })
        );
        assert!(event.is_default_prevented());
        assert_eq!(
            engine.session().map(Session::scroll_intent),
            Some(ScrollIntent::NotYielding)
        );
    }

    #[test]
    fn vertical_first_move_yields_to_scroll() {
        let (mut engine, clock) = new_engine(GestureConfig::default());
        engine.start(Backend::Touch, &touch(RawEventKind::Start, 0.0, 0.0));

        clock.0.set(10.0);
        let event = touch(RawEventKind::Move, 1.0, 5.0);
        assert_eq!(engine.moved(&event), None);
        assert!(!event.is_default_prevented());
        assert_eq!(engine.state(), GestureState::ScrollYielded);

        clock.0.set(20.0);
        assert_eq!(engine.moved(&touch(RawEventKind::Move, 50.0, 5.0)), None);
        assert!(matches!(
            engine.end(&touch(RawEventKind::End, 1.0, 5.0)),
            Some(Emission::End { .. })
        ));
        assert_eq!(engine.state(), GestureState::Idle);
    }

    #[test]
    fn prevent_scroll_never_yields() {
        let (mut engine, clock) = new_engine(GestureConfig::default().with_prevent_scroll(true));
        engine.start(Backend::Touch, &touch(RawEventKind::Start, 0.0, 0.0));
        clock.0.set(10.0);
        assert!(engine.moved(&touch(RawEventKind::Move, 0.0, 30.0)).is_some());
        assert_eq!(engine.state(), GestureState::Tracking);
    }

    #[test]
    fn mouse_sessions_never_classify_scroll() {
        let (mut engine, clock) = new_engine(GestureConfig::default());
        let down = RawEvent::mouse(RawEventKind::Start, Point::ZERO);
        engine.start(Backend::Mouse, &down);
        assert!(down.is_default_prevented());

        clock.0.set(10.0);
        let up_and_down = RawEvent::mouse(RawEventKind::Move, Point::new(0.0, 40.0));
        assert!(engine.moved(&up_and_down).is_some());
        assert_eq!(
            engine.session().map(Session::scroll_intent),
            Some(ScrollIntent::Undetermined)
        );
    }

    #[test]
    fn touch_start_keeps_native_default_action() {
        let (mut engine, _) = new_engine(GestureConfig::default());
        let start = touch(RawEventKind::Start, 0.0, 0.0);
        engine.start(Backend::Touch, &start);
        assert!(!start.is_default_prevented());

        let pointer = RawEvent::pointer(RawEventKind::Start, Point::ZERO, PointerType::Touch);
        engine.start(Backend::Pointer, &pointer);
        assert!(pointer.is_default_prevented());
    }

    #[test]
    fn mouse_end_keeps_last_displacement() {
        let (mut engine, clock) = new_engine(GestureConfig::default());
        engine.start(Backend::Mouse, &RawEvent::mouse(RawEventKind::Start, Point::ZERO));
        clock.0.set(10.0);
        engine.moved(&RawEvent::mouse(RawEventKind::Move, Point::new(10.0, 0.0)));
        clock.0.set(20.0);
        let end = engine.end(&RawEvent::mouse(RawEventKind::End, Point::new(90.0, 0.0)));
        assert!(matches!(
            end,
            Some(Emission::End { displacement, .. }) if displacement == Offset::new(10.0, 0.0)
        ));
    }

    #[test]
    fn pointer_end_recomputes_displacement() {
        let (mut engine, clock) = new_engine(GestureConfig::default());
        let start = RawEvent::pointer(RawEventKind::Start, Point::ZERO, PointerType::Touch);
        engine.start(Backend::Pointer, &start);
        clock.0.set(10.0);
        engine.moved(&RawEvent::pointer(
            RawEventKind::Move,
            Point::new(10.0, 0.0),
            PointerType::Touch,
        ));
        clock.0.set(20.0);
        let end = engine.end(&RawEvent::pointer(
            RawEventKind::End,
            Point::new(30.0, 0.0),
            PointerType::Touch,
        ));
        assert!(matches!(
            end,
            Some(Emission::End { displacement, velocity, .. })
                if displacement == Offset::new(30.0, 0.0) && velocity == Velocity::new(1.5, 0.0)
        ));
    }

    #[test]
    fn touch_end_without_contacts_keeps_last_displacement() {
        let (mut engine, clock) = new_engine(GestureConfig::default());
        engine.start(Backend::Touch, &touch(RawEventKind::Start, 0.0, 0.0));
        clock.0.set(10.0);
        engine.moved(&touch(RawEventKind::Move, 8.0, 2.0));
        clock.0.set(16.0);
        let end = RawEvent::touch(RawEventKind::End, None, 0);
        assert!(matches!(
            engine.end(&end),
            Some(Emission::End { displacement, .. }) if displacement == Offset::new(8.0, 2.0)
        ));
        assert!(end.is_blur_requested());
    }

    #[test]
    fn touch_end_ignores_remaining_contact() {
        let (mut engine, clock) = new_engine(GestureConfig::default());
        engine.start(Backend::Touch, &touch(RawEventKind::Start, 0.0, 0.0));
        clock.0.set(10.0);
        engine.moved(&touch(RawEventKind::Move, 10.0, 0.0));
        clock.0.set(20.0);
        // A second finger resting at (300, 300) is still listed when the
        // tracked finger lifts.
        let end = touch(RawEventKind::End, 300.0, 300.0);
        assert_eq!(
            engine.end(&end),
            Some(Emission::End {
                start: SessionStart {
                    position: Point::ZERO,
                    time_ms: 0.0
                },
                displacement: Offset::new(10.0, 0.0),
                velocity: Velocity::new(1.0, 0.0),
            })
        );
    }

    #[test]
    fn stray_events_are_ignored() {
        let (mut engine, _) = new_engine(GestureConfig::default());
        assert_eq!(engine.moved(&touch(RawEventKind::Move, 1.0, 1.0)), None);
        assert_eq!(engine.end(&touch(RawEventKind::End, 1.0, 1.0)), None);
        assert_eq!(engine.state(), GestureState::Idle);
        assert!(engine.clicks_allowed());
    }

    #[test]
    fn rejected_start_respects_click_reset_order() {
        for (order, expected) in [
            (ClickReset::AfterAdmission, false),
            (ClickReset::BeforeAdmission, true),
        ] {
            let (mut engine, clock) = new_engine(GestureConfig::default().with_click_reset(order));
            engine.start(Backend::Touch, &touch(RawEventKind::Start, 0.0, 0.0));
            clock.0.set(10.0);
            engine.moved(&touch(RawEventKind::Move, 20.0, 0.0));
            assert!(!engine.clicks_allowed());

            let two_fingers = RawEvent::touch(RawEventKind::Start, Some(Point::ZERO), 2);
            assert_eq!(engine.start(Backend::Touch, &two_fingers), None);
            assert_eq!(engine.clicks_allowed(), expected, "{order:?}");
            assert_eq!(engine.state(), GestureState::Tracking);
        }
    }

    #[test]
    fn suppressed_click_prevents_default_and_blurs() {
        let (mut engine, clock) = new_engine(GestureConfig::default());
        let click = RawEvent::click();
        assert_eq!(engine.click(&click), Some(Emission::Click));
        assert!(!click.is_default_prevented());

        engine.start(Backend::Touch, &touch(RawEventKind::Start, 0.0, 0.0));
        clock.0.set(10.0);
        engine.moved(&touch(RawEventKind::Move, 5.0, 0.0));
        engine.end(&RawEvent::touch(RawEventKind::End, None, 0));

        let click = RawEvent::click();
        assert_eq!(engine.click(&click), None);
        assert!(click.is_default_prevented());
        assert!(click.is_blur_requested());
    }

    #[test]
    fn abandon_drops_session_silently() {
        let (mut engine, _) = new_engine(GestureConfig::default());
        engine.start(Backend::Touch, &touch(RawEventKind::Start, 0.0, 0.0));
        engine.abandon();
        assert_eq!(engine.state(), GestureState::Idle);
        assert!(engine.session().is_none());
        assert_eq!(engine.end(&touch(RawEventKind::End, 0.0, 0.0)), None);
    }
}
