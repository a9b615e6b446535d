use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Error, Result, TimeSource};

/// Wall-clock time source backed by [`SystemTime`].
///
/// Reads the system clock on every call, so it follows NTP steps in both
/// directions. Generators absorb a backward step by restarting their sequence.
/// If the system clock is later stepped back past the epoch, it reads as zero.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    epoch: SystemTime,
}

impl Default for SystemClock {
    /// A clock counting from the Unix epoch.
    fn default() -> Self {
        Self { epoch: UNIX_EPOCH }
    }
}

impl SystemClock {
    /// A clock counting from `epoch`, given as an offset from the Unix epoch.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockBeforeEpoch`] if the current system time is earlier
    ///   than `epoch`, including epochs too large for [`SystemTime`].
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use sid::{SystemClock, TimeSource};
    ///
    /// // Wednesday, January 1, 2025 00:00:00 UTC
    /// let clock = SystemClock::with_epoch(Duration::from_secs(1_735_689_600)).unwrap();
    /// assert!(clock.current_time() > Duration::ZERO);
    ///
    /// assert!(SystemClock::with_epoch(Duration::MAX).is_err());
    /// ```
    pub fn with_epoch(epoch: Duration) -> Result<Self> {
        let epoch = UNIX_EPOCH
            .checked_add(epoch)
            .ok_or(Error::ClockBeforeEpoch)?;
        if SystemTime::now() < epoch {
            return Err(Error::ClockBeforeEpoch);
        }
        Ok(Self { epoch })
    }
}

impl TimeSource for SystemClock {
    fn current_time(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.epoch)
            .unwrap_or(Duration::ZERO)
    }
}
