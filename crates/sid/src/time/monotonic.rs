use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::{Error, Result, TimeSource};

/// A monotonic time source that returns elapsed time since construction,
/// offset from a user-defined epoch.
///
/// This avoids wall-clock adjustments (e.g., NTP or daylight savings changes)
/// while still aligning timestamps to a fixed origin.
///
/// Internally, the clock captures `Instant::now()` at construction and adds
/// the elapsed monotonic time to the offset between the wall clock and the
/// epoch at that moment. Unlike [`SystemClock`](crate::SystemClock) it never
/// goes backward, so generators driven by it never take the clock-regression
/// path. Clones share the same anchor.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    epoch_offset: Duration,
}

impl Default for MonotonicClock {
    /// Constructs a monotonic clock aligned to the Unix epoch.
    fn default() -> Self {
        let start = Instant::now();
        let epoch_offset = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        Self {
            start,
            epoch_offset,
        }
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock using a custom epoch as the origin (t = 0),
    /// specified as an offset from the Unix epoch.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockBeforeEpoch`] if the current system time is earlier
    ///   than `epoch`.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use sid::{MonotonicClock, TimeSource};
    ///
    /// // Wednesday, January 1, 2025 00:00:00 UTC
    /// let clock = MonotonicClock::with_epoch(Duration::from_secs(1_735_689_600)).unwrap();
    /// assert!(clock.current_time() > Duration::ZERO);
    ///
    /// assert!(MonotonicClock::with_epoch(Duration::from_secs(u64::from(u32::MAX) * 4)).is_err());
    /// ```
    pub fn with_epoch(epoch: Duration) -> Result<Self> {
        let start = Instant::now();
        let system_now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| Error::ClockBeforeEpoch)?;
        let epoch_offset = system_now
            .checked_sub(epoch)
            .ok_or(Error::ClockBeforeEpoch)?;
        Ok(Self {
            start,
            epoch_offset,
        })
    }

    /// Constructs a clock whose epoch is the moment of construction.
    ///
    /// Timestamps from such a clock only order IDs within the process that
    /// created it.
    #[must_use]
    pub fn starting_now() -> Self {
        Self {
            start: Instant::now(),
            epoch_offset: Duration::ZERO,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_time(&self) -> Duration {
        self.epoch_offset + self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_goes_backward() {
        let clock = MonotonicClock::default();
        let mut last = clock.current_time();
        for _ in 0..10_000 {
            let now = clock.current_time();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn starting_now_counts_from_zero() {
        let clock = MonotonicClock::starting_now();
        assert!(clock.current_time() < Duration::from_secs(60));
    }

    #[test]
    fn tracks_wall_clock_at_construction() {
        let clock = MonotonicClock::default();
        let wall = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        let mono = clock.current_time();
        let skew = if wall > mono { wall - mono } else { mono - wall };
        assert!(skew < Duration::from_secs(1));
    }

    #[test]
    fn future_epoch_is_rejected() {
        let far = Duration::from_secs(u64::from(u32::MAX) * 4);
        assert!(matches!(
            MonotonicClock::with_epoch(far),
            Err(Error::ClockBeforeEpoch)
        ));
    }

    #[test]
    fn clones_share_anchor() {
        let clock = MonotonicClock::with_epoch(Duration::ZERO).unwrap();
        let copy = clock;
        let a = clock.current_time();
        let b = copy.current_time();
        assert!(b >= a);
    }
}
