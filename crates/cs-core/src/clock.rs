//! Animation clock.
//!
//! The clock converts monotonic time into elapsed milliseconds since the
//! animation epoch. The epoch is set when the widget starts and is moved to
//! "now" after every successful content reload, so a fresh label always
//! starts its sweep from the left edge. Phase computation is the renderer's
//! job; the clock only measures time and reports the redraw cadence.

use std::time::{Duration, Instant};

/// Monotonic animation clock with a resettable epoch.
///
/// Every method takes `now` explicitly so callers (and tests) decide what
/// time it is.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use cs_core::AnimationClock;
///
/// let start = Instant::now();
/// let clock = AnimationClock::new(start, 33);
/// let elapsed = clock.elapsed_ms(start + Duration::from_millis(250));
/// assert!((elapsed - 250.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock {
    epoch: Instant,
    tick: Duration,
}

impl AnimationClock {
    /// Creates a clock whose epoch is `now`, ticking every `tick_ms`.
    #[must_use]
    pub fn new(now: Instant, tick_ms: u32) -> Self {
        Self {
            epoch: now,
            tick: Duration::from_millis(u64::from(tick_ms)),
        }
    }

    /// The current epoch.
    #[must_use]
    pub const fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Interval between redraw requests.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick
    }

    /// Milliseconds elapsed since the epoch, with sub-millisecond precision.
    ///
    /// Returns `0.0` if `now` is before the epoch.
    #[must_use]
    pub fn elapsed_ms(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.epoch).as_secs_f64() * 1000.0
    }

    /// Moves the epoch to `now`.
    ///
    /// The epoch only moves forward; an earlier `now` is ignored and
    /// `false` is returned.
    pub fn reset(&mut self, now: Instant) -> bool {
        if now < self.epoch {
            return false;
        }
        self.epoch = now;
        true
    }
}
