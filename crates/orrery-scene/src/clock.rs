//! Monotonic animation time.

use std::time::{Duration, Instant};

/// Seconds elapsed since program start. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct AnimationTime(f64);

impl AnimationTime {
    pub const ZERO: Self = Self(0.0);

    /// Negative and NaN inputs clamp to zero.
    #[must_use]
    pub fn from_secs(secs: f64) -> Self {
        if secs.is_nan() {
            return Self::ZERO;
        }
        Self(secs.max(0.0))
    }

    #[must_use]
    pub fn as_secs(self) -> f64 {
        self.0
    }
}

impl From<Duration> for AnimationTime {
    fn from(d: Duration) -> Self {
        Self(d.as_secs_f64())
    }
}

/// Reads animation time from a monotonic clock started at construction.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(start: Instant) -> Self {
        Self { start }
    }

    /// Elapsed time since the clock started. Non-decreasing across calls.
    #[must_use]
    pub fn now(&self) -> AnimationTime {
        self.start.elapsed().into()
    }

    #[must_use]
    pub fn start(&self) -> Instant {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_secs_clamps() {
        assert_eq!(AnimationTime::from_secs(-3.0), AnimationTime::ZERO);
        assert_eq!(AnimationTime::from_secs(f64::NAN), AnimationTime::ZERO);
        assert_eq!(AnimationTime::from_secs(1.5).as_secs(), 1.5);
    }

    #[test]
    fn test_now_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a.as_secs() >= 0.0);
    }

    #[test]
    fn test_starting_in_past_reports_elapsed() {
        let Some(start) = Instant::now().checked_sub(Duration::from_secs(2)) else {
            return;
        };
        let clock = FrameClock::starting_at(start);
        assert!(clock.now().as_secs() >= 2.0);
    }
}
