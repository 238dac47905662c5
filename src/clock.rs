//! Time sources for the quiz timer.
//!
//! The widget never reads the system clock directly. It asks a [`Clock`] for
//! the current instant, which lets tests substitute a [`ManualClock`] and move
//! time forward deterministically.
//!
//! ```rust
//! use quiztimer_widgets::clock::{Clock, ManualClock};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_secs(65));
//! assert_eq!(clock.elapsed_since(start), Duration::from_secs(65));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Time elapsed since `start`, or zero if `start` lies in the future.
    fn elapsed_since(&self, start: Instant) -> Duration {
        self.now().saturating_duration_since(start)
    }
}

/// Reads the operating system's monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same offset, so a test can keep one handle while the
/// widget owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock frozen at the moment of construction.
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let nanos = duration_to_nanos(by);
        self.offset_nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    /// Places the clock exactly `offset` after its base instant.
    pub fn set(&self, offset: Duration) {
        self.offset_nanos
            .store(duration_to_nanos(offset), Ordering::SeqCst);
    }

    /// How far the clock has moved since construction.
    pub fn offset(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset()
    }
}

fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_frozen() {
        let clock = ManualClock::new();
        let first = clock.now();
        let second = clock.now();
        assert_eq!(first, second);
        assert_eq!(clock.offset(), Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_advance_accumulates() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.advance(Duration::from_millis(1500));
        clock.advance(Duration::from_millis(500));

        assert_eq!(clock.elapsed_since(start), Duration::from_secs(2));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        handle.advance(Duration::from_secs(10));

        assert_eq!(clock.offset(), Duration::from_secs(10));
        assert_eq!(clock.now(), handle.now());
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(30));
        clock.set(Duration::from_secs(5));
        assert_eq!(clock.offset(), Duration::from_secs(5));
    }

    #[test]
    fn test_elapsed_since_future_start_saturates() {
        let clock = ManualClock::new();
        let future = clock.now() + Duration::from_secs(3);
        assert_eq!(clock.elapsed_since(future), Duration::ZERO);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
