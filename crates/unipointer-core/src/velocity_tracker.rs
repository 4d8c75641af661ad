//! Windowed displacement history for velocity estimation.
//!
//! The history starts with a zero sample at session start and keeps at most
//! [`HISTORY_SIZE`] samples in ascending time order. Velocity is the slope
//! between the newest displacement and the oldest sample still inside the
//! [`VELOCITY_WINDOW_MS`] window.

use smallvec::SmallVec;
use unipointer_geometry::{Offset, Velocity};

use crate::gesture_constants::{HISTORY_SIZE, VELOCITY_WINDOW_MS};

/// Displacement from the session start at a given elapsed time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplacementSample {
    pub displacement: Offset,
    pub elapsed_ms: f64,
}

#[derive(Clone, Debug)]
pub struct SampleHistory {
    samples: SmallVec<[DisplacementSample; HISTORY_SIZE]>,
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleHistory {
    /// Creates a history holding the single zero sample.
    pub fn new() -> Self {
        let mut samples = SmallVec::new();
        samples.push(DisplacementSample::default());
        Self { samples }
    }

    /// Drops everything but a fresh zero sample.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.samples.push(DisplacementSample::default());
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[DisplacementSample] {
        &self.samples
    }

    pub fn newest(&self) -> DisplacementSample {
        self.samples.last().copied().unwrap_or_default()
    }

    /// Records a sample and returns the velocity it implies.
    ///
    /// Returns `None` without recording when `elapsed_ms` does not advance
    /// past the newest sample, so the divisor is always strictly positive.
    pub fn record(&mut self, displacement: Offset, elapsed_ms: f64) -> Option<Velocity> {
        if elapsed_ms <= self.newest().elapsed_ms {
            return None;
        }

        let reference = self.reference_sample(elapsed_ms);
        let velocity = Velocity::from_distance(
            displacement - reference.displacement,
            elapsed_ms - reference.elapsed_ms,
        );

        if self.samples.len() >= HISTORY_SIZE {
            self.samples.remove(0);
        }
        self.samples.push(DisplacementSample {
            displacement,
            elapsed_ms,
        });

        Some(velocity)
    }

    /// Oldest sample within the window, or the newest when none qualifies.
    fn reference_sample(&self, elapsed_ms: f64) -> DisplacementSample {
        let last = self.samples.len() - 1;
        let index = self.samples[..last]
            .iter()
            .position(|sample| elapsed_ms - sample.elapsed_ms <= VELOCITY_WINDOW_MS)
            .unwrap_or(last);
        self.samples[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_zero_sample() {
        let history = SampleHistory::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.newest(), DisplacementSample::default());
    }

    #[test]
    fn velocity_against_zero_sample() {
        let mut history = SampleHistory::new();
        let velocity = history.record(Offset::new(20.0, 10.0), 10.0);
        assert_eq!(velocity, Some(Velocity::new(2.0, 1.0)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn duplicate_timestamp_is_skipped() {
        let mut history = SampleHistory::new();
        history.record(Offset::new(5.0, 0.0), 10.0);
        assert_eq!(history.record(Offset::new(9.0, 0.0), 10.0), None);
        assert_eq!(history.len(), 2);
        assert_eq!(history.newest().displacement, Offset::new(5.0, 0.0));
    }

    #[test]
    fn regressed_timestamp_is_skipped() {
        let mut history = SampleHistory::new();
        history.record(Offset::new(5.0, 0.0), 30.0);
        assert_eq!(history.record(Offset::new(6.0, 0.0), 20.0), None);
        assert_eq!(history.newest().elapsed_ms, 30.0);
    }

    #[test]
    fn bounded_and_ascending() {
        let mut history = SampleHistory::new();
        for step in 1..=20 {
            history.record(Offset::new(step as f32, 0.0), step as f64 * 16.0);
            assert!(history.len() <= HISTORY_SIZE);
            assert!(history
                .samples()
                .windows(2)
                .all(|pair| pair[0].elapsed_ms < pair[1].elapsed_ms));
        }
        assert_eq!(history.len(), HISTORY_SIZE);
        assert_eq!(history.samples()[0].elapsed_ms, 16.0 * 16.0);
    }

    #[test]
    fn reference_is_oldest_sample_inside_window() {
        let mut history = SampleHistory::new();
        history.record(Offset::new(10.0, 0.0), 50.0);
        history.record(Offset::new(20.0, 0.0), 100.0);
        // 130 - 0 > 80, 130 - 50 <= 80: measured against the 50ms sample.
        let velocity = history.record(Offset::new(50.0, 0.0), 130.0);
        assert_eq!(velocity, Some(Velocity::new(0.5, 0.0)));
    }

    #[test]
    fn falls_back_to_newest_sample_after_a_pause() {
        let mut history = SampleHistory::new();
        history.record(Offset::new(10.0, 0.0), 10.0);
        history.record(Offset::new(20.0, 0.0), 20.0);
        // Every sample is older than the window: use the newest one.
        let velocity = history.record(Offset::new(30.0, -40.0), 520.0);
        assert_eq!(velocity, Some(Velocity::new(0.02, -0.08)));
    }

    #[test]
    fn reset_restores_zero_sample() {
        let mut history = SampleHistory::new();
        history.record(Offset::new(1.0, 1.0), 1.0);
        history.reset();
        assert_eq!(history.samples(), &[DisplacementSample::default()]);
    }
}
