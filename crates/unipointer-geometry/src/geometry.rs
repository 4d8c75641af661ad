//! Geometric primitives: Point, Offset

use std::ops::{Add, Sub};

/// A position in surface (client) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Offset {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}

/// Displacement between two points.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

impl Offset {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    /// Largest absolute component, the "chebyshev" length used for slop checks.
    pub fn max_abs(&self) -> f32 {
        self.dx.abs().max(self.dy.abs())
    }

    /// True when the vertical component dominates strictly.
    pub fn is_mostly_vertical(&self) -> bool {
        self.dy.abs() > self.dx.abs()
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Offset {
        Offset {
            dx: self.dx - rhs.dx,
            dy: self.dy - rhs.dy,
        }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Self) -> Offset {
        Offset {
            dx: self.dx + rhs.dx,
            dy: self.dy + rhs.dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_difference_is_offset() {
        let start = Point::new(10.0, 20.0);
        let current = Point::new(13.0, 16.0);
        assert_eq!(current - start, Offset::new(3.0, -4.0));
        assert_eq!(start + (current - start), current);
    }

    #[test]
    fn vertical_dominance_is_strict() {
        assert!(Offset::new(1.0, 5.0).is_mostly_vertical());
        assert!(!Offset::new(2.0, 1.0).is_mostly_vertical());
        assert!(!Offset::new(3.0, -3.0).is_mostly_vertical());
        assert_eq!(Offset::new(-7.0, 2.0).max_abs(), 7.0);
    }
}
