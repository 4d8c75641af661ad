//! Velocity in logical pixels per millisecond.

use crate::geometry::Offset;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    /// Velocity covering `distance` in `elapsed_ms`.
    ///
    /// Callers must pass a strictly positive duration.
    pub fn from_distance(distance: Offset, elapsed_ms: f64) -> Self {
        debug_assert!(elapsed_ms > 0.0, "velocity divisor must be positive");
        let elapsed = elapsed_ms as f32;
        Self {
            x: distance.dx / elapsed,
            y: distance.dy / elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_from_distance() {
        let v = Velocity::from_distance(Offset::new(20.0, -10.0), 10.0);
        assert_eq!(v, Velocity::new(2.0, -1.0));
    }
}
