//! Simulation clock
//!
//! Provides the per-tick delta and the total elapsed time every time-based
//! rule reads. The clock only moves forward.

use serde::{Deserialize, Serialize};

use crate::core::types::SimTime;

/// Monotonic simulation clock advanced once per tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    elapsed: SimTime,
    delta: SimTime,
    tick: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Negative deltas are treated as zero.
    pub fn advance(&mut self, dt: SimTime) {
        self.delta = dt.max(0.0);
        self.elapsed += self.delta;
        self.tick += 1;
    }

    /// Seconds elapsed since the previous tick
    pub fn delta(&self) -> SimTime {
        self.delta
    }

    /// Seconds elapsed since simulation start
    pub fn elapsed(&self) -> SimTime {
        self.elapsed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_accumulates() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_tick(), 2);
        assert!((clock.elapsed() - 0.75).abs() < 1e-6);
        assert!((clock.delta() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut clock = SimClock::new();
        clock.advance(1.0);
        clock.advance(-3.0);
        assert_eq!(clock.delta(), 0.0);
        assert!((clock.elapsed() - 1.0).abs() < 1e-6);
    }
}
