//! The live drag session.

use unipointer_geometry::{Offset, Point, Velocity};

use crate::backend::Backend;
use crate::velocity_tracker::SampleHistory;

/// Where and when a session began. Passed to every callback of the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionStart {
    pub position: Point,
    pub time_ms: f64,
}

/// Whether the gesture was handed over to native vertical scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollIntent {
    #[default]
    Undetermined,
    Yielding,
    NotYielding,
}

#[derive(Clone, Debug)]
pub struct Session {
    start: SessionStart,
    backend: Backend,
    displacement: Offset,
    elapsed_ms: f64,
    velocity: Velocity,
    scroll_intent: ScrollIntent,
    history: SampleHistory,
}

impl Session {
    pub fn new(backend: Backend, position: Point, time_ms: f64) -> Self {
        Self {
            start: SessionStart { position, time_ms },
            backend,
            displacement: Offset::ZERO,
            elapsed_ms: 0.0,
            velocity: Velocity::ZERO,
            scroll_intent: ScrollIntent::Undetermined,
            history: SampleHistory::new(),
        }
    }

    pub fn start(&self) -> SessionStart {
        self.start
    }

    /// Backend that started the session; may differ from the engine's
    /// selected backend when mouse presses start sessions under touch.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn displacement(&self) -> Offset {
        self.displacement
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn scroll_intent(&self) -> ScrollIntent {
        self.scroll_intent
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    /// Resolves the scroll intent. Later calls keep the first decision.
    pub(crate) fn resolve_scroll_intent(&mut self, yielding: bool) -> ScrollIntent {
        if self.scroll_intent == ScrollIntent::Undetermined {
            self.scroll_intent = if yielding {
                ScrollIntent::Yielding
            } else {
                ScrollIntent::NotYielding
            };
        }
        self.scroll_intent
    }

    /// Updates displacement and velocity for the pointer at `position`.
    ///
    /// Velocity keeps its previous value when the timestamp did not advance.
    pub fn update(&mut self, position: Point, now_ms: f64) -> (Offset, Velocity) {
        self.displacement = position - self.start.position;
        self.elapsed_ms = now_ms - self.start.time_ms;
        if let Some(velocity) = self.history.record(self.displacement, self.elapsed_ms) {
            self.velocity = velocity;
        }
        (self.displacement, self.velocity)
    }
}
