use core::time::Duration;

use crate::{Error, Result};

/// Default salt rotation interval: one day.
pub const DEFAULT_SALT_ROTATION_SECS: u64 = 86_400;

/// Tunables for a generator.
///
/// Salt rotation is measured in whole wall-clock seconds, independently of
/// the 100ns ticks used for sequencing.
///
/// With the `serde` feature this can be embedded in a host's configuration
/// file; missing fields fall back to their defaults.
///
/// # Example
/// ```
/// use core::time::Duration;
/// use sid::Config;
///
/// let config = Config::with_salt_rotation(Duration::from_secs(3600)).unwrap();
/// assert_eq!(config.salt_rotation_secs, 3600);
///
/// assert!(Config::with_salt_rotation(Duration::from_millis(500)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    /// Seconds between salt rotations. Must be at least one.
    pub salt_rotation_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            salt_rotation_secs: DEFAULT_SALT_ROTATION_SECS,
        }
    }
}

impl Config {
    /// Builds a config rotating the salt every `interval`, truncated to whole
    /// seconds.
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] if `interval` is shorter than one second.
    pub fn with_salt_rotation(interval: Duration) -> Result<Self> {
        let config = Self {
            salt_rotation_secs: interval.as_secs(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the config can drive a generator.
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] if the rotation interval is zero or does not
    ///   fit the signed second counter used for rotation bookkeeping.
    pub fn validate(&self) -> Result<()> {
        if self.salt_rotation_secs == 0 {
            return Err(Error::InvalidConfig {
                reason: "salt rotation interval must be at least one second",
            });
        }
        if i64::try_from(self.salt_rotation_secs).is_err() {
            return Err(Error::InvalidConfig {
                reason: "salt rotation interval is too large",
            });
        }
        Ok(())
    }

    pub(crate) fn salt_rotation_secs_i64(&self) -> i64 {
        i64::try_from(self.salt_rotation_secs).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rotates_daily() {
        let config = Config::default();
        assert_eq!(config.salt_rotation_secs, 86_400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sub_second_interval_is_rejected() {
        let err = Config::with_salt_rotation(Duration::from_millis(999)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn oversized_interval_is_rejected() {
        let config = Config {
            salt_rotation_secs: u64::MAX,
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn interval_is_truncated_to_seconds() {
        let config = Config::with_salt_rotation(Duration::from_millis(2_750)).unwrap();
        assert_eq!(config.salt_rotation_secs, 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());

        let config: Config = serde_json::from_str(r#"{"salt_rotation_secs": 60}"#).unwrap();
        assert_eq!(config.salt_rotation_secs, 60);

        assert!(serde_json::from_str::<Config>(r#"{"salt_rotation": 60}"#).is_err());
    }
}
