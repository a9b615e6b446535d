use core::time::Duration;

/// Nanoseconds per timestamp tick.
pub const NANOS_PER_TICK: u32 = 100;

/// A trait for time sources that return elapsed time since an epoch.
///
/// This abstraction allows you to plug in the system wall clock, a monotonic
/// timer, or a mocked time source in tests.
///
/// The generator reads this once per ID and derives two values from the same
/// sample: 100ns ticks for the timestamp field and whole seconds for salt
/// rotation.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use sid::{TimeSource, to_ticks};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_time(&self) -> Duration {
///         Duration::from_micros(1)
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(to_ticks(time.current_time()), 10);
/// ```
pub trait TimeSource {
    /// Returns the time elapsed since the configured epoch.
    fn current_time(&self) -> Duration;
}

/// Converts a duration to whole 100ns ticks.
///
/// Values beyond `u64::MAX` ticks (about 58,000 years) saturate.
#[must_use]
pub fn to_ticks(elapsed: Duration) -> u64 {
    let ticks = elapsed.as_nanos() / u128::from(NANOS_PER_TICK);
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

/// Converts 100ns ticks back to a duration.
#[must_use]
pub const fn from_ticks(ticks: u64) -> Duration {
    let secs = ticks / 10_000_000;
    let nanos = (ticks % 10_000_000) as u32 * NANOS_PER_TICK;
    Duration::new(secs, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_truncate_sub_tick_nanos() {
        assert_eq!(to_ticks(Duration::from_nanos(0)), 0);
        assert_eq!(to_ticks(Duration::from_nanos(99)), 0);
        assert_eq!(to_ticks(Duration::from_nanos(100)), 1);
        assert_eq!(to_ticks(Duration::from_secs(1)), 10_000_000);
    }

    #[test]
    fn ticks_round_trip_through_duration() {
        let d = Duration::new(1_700_000_000, 123_456_700);
        assert_eq!(from_ticks(to_ticks(d)), d);
    }

    #[test]
    fn huge_durations_saturate() {
        assert_eq!(to_ticks(Duration::MAX), u64::MAX);
    }
}
