//! Frame time tracking

use std::time::{Duration, Instant};

/// Tracks wall-clock time across frames.
#[derive(Debug, Clone, Copy)]
pub struct Time {
    start: Instant,
    last: Instant,
    current: Instant,
    delta: Duration,
}

impl Time {
    /// Create a tracker anchored at now
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            current: now,
            delta: Duration::ZERO,
        }
    }

    /// Advance to the current instant; call once per frame
    pub fn update(&mut self) {
        self.last = self.current;
        self.current = Instant::now();
        self.delta = self.current - self.last;
    }

    /// Time elapsed between the two most recent updates
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Delta time in seconds
    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Time elapsed since the tracker was created
    #[must_use]
    pub fn since_start(&self) -> Duration {
        self.current - self.start
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
