use core::fmt;
use std::sync::OnceLock;

#[cfg(feature = "tracing")]
use tracing::warn;

use crate::{RandSource, ThreadRandom};
#[cfg(feature = "mac-address")]
use crate::{Error, Result};

/// A 12-bit reduction of a process id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ProcessTag(u16);

impl ProcessTag {
    /// Mask selecting the 12 tag bits.
    pub const MASK: u16 = 0x0FFF;

    /// Folds a process id down to 12 bits by XOR-ing its 12-bit lanes.
    ///
    /// # Example
    /// ```
    /// use sid::ProcessTag;
    ///
    /// assert_eq!(ProcessTag::from_pid(0x1234).get(), 0x235);
    /// ```
    #[must_use]
    pub const fn from_pid(pid: u64) -> Self {
        let x = pid;
        let folded = x ^ (x >> 12) ^ (x >> 24) ^ (x >> 36) ^ (x >> 48) ^ (x >> 60);
        Self((folded & Self::MASK as u64) as u16)
    }

    /// Wraps an already reduced tag. Bits above the low 12 are dropped.
    #[must_use]
    pub const fn from_raw(tag: u16) -> Self {
        Self(tag & Self::MASK)
    }

    /// Tag of the running process.
    #[must_use]
    pub fn current() -> Self {
        Self::from_pid(u64::from(std::process::id()))
    }

    /// Returns the 12-bit value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for ProcessTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessTag({:#05x})", self.0)
    }
}

/// A 48-bit host identifier, normally a hardware (MAC) address.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeTag([u8; 6]);

impl NodeTag {
    /// Wraps six octets verbatim.
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the six octets.
    #[must_use]
    pub const fn octets(self) -> [u8; 6] {
        self.0
    }

    /// Returns `true` for the multicast bit used to mark random node tags.
    #[must_use]
    pub const fn is_multicast(self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Reads the first non-zero hardware address of this host.
    ///
    /// # Errors
    /// - [`Error::HardwareAddress`] if the interfaces cannot be queried.
    /// - [`Error::NodeUnavailable`] if no interface carries a usable address.
    #[cfg_attr(docsrs, doc(cfg(feature = "mac-address")))]
    #[cfg(feature = "mac-address")]
    pub fn from_hardware() -> Result<Self> {
        let mac = mac_address::get_mac_address()?.ok_or(Error::NodeUnavailable)?;
        let octets = mac.bytes();
        if octets == [0; 6] {
            return Err(Error::NodeUnavailable);
        }
        Ok(Self(octets))
    }

    /// Draws a random tag with the multicast bit set. Real interface
    /// addresses are unicast, so a random tag never equals one of them.
    #[must_use]
    pub fn random<R: RandSource>(rng: &R) -> Self {
        let mut octets = [0_u8; 6];
        rng.fill_bytes(&mut octets);
        octets[0] |= 0x01;
        Self(octets)
    }
}

impl fmt::Debug for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "NodeTag({a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x})"
        )
    }
}

/// The fields that place an ID on a particular process of a particular host.
///
/// Computed once and read-only afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Reduced id of the generating process.
    pub process: ProcessTag,
    /// Identifier of the generating host.
    pub node: NodeTag,
}

static CURRENT: OnceLock<Identity> = OnceLock::new();

impl Identity {
    /// Builds an identity from explicit parts.
    #[must_use]
    pub const fn new(process: ProcessTag, node: NodeTag) -> Self {
        Self { process, node }
    }

    /// Identity of the running process, detected on first use and cached for
    /// the life of the process.
    ///
    /// The node tag comes from [`NodeTag::from_hardware`]. If that fails, or
    /// the `mac-address` feature is off, a random multicast tag is used
    /// instead.
    pub fn current() -> Self {
        *CURRENT.get_or_init(Self::detect)
    }

    fn detect() -> Self {
        Self {
            process: ProcessTag::current(),
            node: detect_node(),
        }
    }
}

#[cfg(feature = "mac-address")]
fn detect_node() -> NodeTag {
    match NodeTag::from_hardware() {
        Ok(node) => node,
        #[allow(unused_variables)]
        Err(err) => {
            #[cfg(feature = "tracing")]
            warn!(error = %err, "falling back to a random node tag");
            NodeTag::random(&ThreadRandom)
        }
    }
}

#[cfg(not(feature = "mac-address"))]
fn detect_node() -> NodeTag {
    #[cfg(feature = "tracing")]
    warn!("node discovery disabled, using a random node tag");
    NodeTag::random(&ThreadRandom)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBytes(u8);

    impl RandSource for FixedBytes {
        fn rand_u32(&self) -> u32 {
            u32::from(self.0)
        }

        fn fill_bytes(&self, dest: &mut [u8]) {
            dest.fill(self.0);
        }
    }

    #[test]
    fn process_tag_folds_all_lanes() {
        assert_eq!(ProcessTag::from_pid(0).get(), 0);
        assert_eq!(ProcessTag::from_pid(0xFFF).get(), 0xFFF);
        assert_eq!(ProcessTag::from_pid(0x1000).get(), 0x001);
        assert_eq!(ProcessTag::from_pid(0x1234).get(), 0x235);
        // Five full lanes leave 0xFFF and the top nibble lane clears 0xF.
        assert_eq!(ProcessTag::from_pid(u64::MAX).get(), 0xFF0);
        assert_eq!(ProcessTag::from_pid(1 << 60).get(), 0x001);
    }

    #[test]
    fn process_tag_is_stable_for_this_process() {
        assert_eq!(ProcessTag::current(), ProcessTag::current());
        assert!(ProcessTag::current().get() <= ProcessTag::MASK);
    }

    #[test]
    fn from_raw_drops_high_bits() {
        assert_eq!(ProcessTag::from_raw(0xF123).get(), 0x123);
    }

    #[test]
    fn random_node_is_multicast() {
        let node = NodeTag::random(&FixedBytes(0x00));
        assert_eq!(node.octets(), [0x01, 0, 0, 0, 0, 0]);
        assert!(node.is_multicast());

        let node = NodeTag::random(&FixedBytes(0xAA));
        assert_eq!(node.octets(), [0xAB, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA]);
    }

    #[test]
    fn current_identity_is_cached() {
        let a = Identity::current();
        let b = Identity::current();
        assert_eq!(a, b);
        assert_eq!(a.process, ProcessTag::current());
    }

    #[test]
    fn debug_formats_are_readable() {
        assert_eq!(format!("{:?}", ProcessTag::from_raw(0xA5)), "ProcessTag(0x0a5)");
        assert_eq!(
            format!("{:?}", NodeTag::new([0x01, 0x23, 0x45, 0x67, 0x89, 0xAB])),
            "NodeTag(01:23:45:67:89:ab)"
        );
    }
}
