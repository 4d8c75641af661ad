//! Assertion utilities for robot testing
//!
//! Velocities are quotients of floating point values; compare them with a
//! tolerance rather than exactly.

use unipointer_geometry::{Offset, Velocity};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_offset_approx_eq(actual: Offset, expected: Offset, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.dx, expected.dx, tolerance, &format!("{} - dx", msg));
    assert_approx_eq(actual.dy, expected.dy, tolerance, &format!("{} - dy", msg));
}

pub fn assert_velocity_approx_eq(actual: Velocity, expected: Velocity, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - vx", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - vy", msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_accepts_within_tolerance() {
        assert_approx_eq(1.0001, 1.0, 0.001, "close");
        assert_offset_approx_eq(Offset::new(1.0, 2.0), Offset::new(1.0, 2.0), 0.0, "same");
    }

    #[test]
    #[should_panic(expected = "far")]
    fn approx_eq_rejects_outside_tolerance() {
        assert_approx_eq(2.0, 1.0, 0.5, "far");
    }
}
