//! Testing utilities and harness for Unipointer

pub mod clock;
pub mod host;
pub mod robot;
pub mod robot_assertions;

pub use clock::ManualClock;
pub use host::{ScriptTarget, ScriptedHost};
pub use robot::*;
pub use robot_assertions::{assert_approx_eq, assert_offset_approx_eq, assert_velocity_approx_eq};

pub mod prelude {
    pub use crate::clock::ManualClock;
    pub use crate::host::{ScriptTarget, ScriptedHost};
    pub use crate::robot::*;
    pub use crate::robot_assertions;
}
