//! Clocks that drive the game loop.
//!
//! The [`GameLoop`](crate::game_loop::GameLoop) never calls `Instant::now()`
//! directly. It reads a [`Clock`], so play sessions run on the monotonic
//! [`SystemClock`] while tests and tools step a [`ManualClock`] by exact
//! amounts.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Time since the clock's origin. Must never go backwards.
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from when the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to the loop:
///
/// ```
/// use std::time::Duration;
/// use brandr::time::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_millis(16));
/// assert_eq!(clock.now(), Duration::from_millis(16));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Milliseconds as `f32`, exact for whole-millisecond durations.
pub fn as_millis_f32(duration: Duration) -> f32 {
    duration.as_micros() as f32 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        other.advance_ms(33);
        assert_eq!(clock.now(), Duration::from_millis(33));
    }

    #[test]
    fn whole_milliseconds_convert_exactly() {
        assert_eq!(as_millis_f32(Duration::from_millis(16)), 16.0);
        assert_eq!(as_millis_f32(Duration::from_millis(33)), 33.0);
        assert_eq!(as_millis_f32(Duration::from_micros(1500)), 1.5);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
