/// A result type whose error defaults to the crate [`Error`].
///
/// ID generation itself is infallible. Only setup paths (configuration, node
/// discovery, clock construction) can fail.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `sid` can emit.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A [`Config`](crate::Config) value was rejected by validation.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// What was wrong with it.
        reason: &'static str,
    },

    /// No non-zero hardware address was found on this host.
    #[error("no usable hardware address found")]
    NodeUnavailable,

    /// Querying the network interfaces failed.
    #[cfg_attr(docsrs, doc(cfg(feature = "mac-address")))]
    #[cfg(feature = "mac-address")]
    #[error("hardware address lookup failed: {0}")]
    HardwareAddress(#[from] mac_address::MacAddressError),

    /// The requested epoch lies in the future relative to the system clock.
    #[error("system clock is earlier than the requested epoch")]
    ClockBeforeEpoch,
}
