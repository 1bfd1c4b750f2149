//! Frame pacing for the redraw loop.
//!
//! The orrery has no fixed-rate simulation: every frame reads the animation
//! clock directly. The pacer only measures how long frames take, warns when
//! one stalls, and yields a short sleep between redraws so an idle window
//! does not spin a core.

use std::time::{Duration, Instant};
use tracing::warn;

/// Frames longer than this are reported.
pub const LONG_FRAME: Duration = Duration::from_millis(250);

/// Upper bound on the per-frame sleep, whatever the config asks for.
pub const MAX_FRAME_SLEEP: Duration = Duration::from_millis(100);

/// Measures frame intervals and decides how long to yield between redraws.
pub struct FramePacer {
    previous_time: Instant,
    frame_sleep: Duration,
    last_frame_time: Duration,
    frame_count: u64,
}

impl FramePacer {
    /// Creates a pacer starting from the current instant.
    pub fn new(frame_sleep: Duration) -> Self {
        Self::starting_at(frame_sleep, Instant::now())
    }

    /// Creates a pacer whose first frame is measured from `start`.
    pub fn starting_at(frame_sleep: Duration, start: Instant) -> Self {
        Self {
            previous_time: start,
            frame_sleep: frame_sleep.min(MAX_FRAME_SLEEP),
            last_frame_time: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Marks the end of a frame at the current instant.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// Marks the end of a frame at `now` and returns the time since the
    /// previous tick. An instant earlier than the previous one counts as zero.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let frame_time = now.saturating_duration_since(self.previous_time);
        self.previous_time = now.max(self.previous_time);
        self.last_frame_time = frame_time;
        self.frame_count += 1;

        if frame_time > LONG_FRAME {
            warn!(
                "Frame {} took {:.1}ms",
                self.frame_count,
                frame_time.as_secs_f64() * 1000.0
            );
        }
        frame_time
    }

    /// How long to sleep before requesting the next redraw.
    #[must_use]
    pub fn sleep_duration(&self) -> Duration {
        self.frame_sleep
    }

    /// Sleeps for [`sleep_duration`](Self::sleep_duration).
    pub fn sleep(&self) {
        if !self.frame_sleep.is_zero() {
            std::thread::sleep(self.frame_sleep);
        }
    }

    #[must_use]
    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
