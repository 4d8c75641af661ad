//! Pure math for pointer gestures in Unipointer
//!
//! This crate contains the point, displacement and velocity primitives
//! shared by the gesture engine and the platform hosts.

mod geometry;
mod motion;

pub use geometry::*;
pub use motion::*;

pub mod prelude {
    pub use crate::geometry::{Offset, Point};
    pub use crate::motion::Velocity;
}
