//! Shared constants for velocity estimation and click detection.

/// Samples kept for velocity estimation, including the zero sample taken at
/// session start.
pub const HISTORY_SIZE: usize = 5;

/// Velocity is measured against the oldest sample no older than this many
/// milliseconds.
pub const VELOCITY_WINDOW_MS: f64 = 80.0;

/// Default click tolerance in logical pixels: any movement cancels clicks.
pub const DEFAULT_CLICK_TOLERANCE: f32 = 0.0;
