use core::{cmp::Ordering, fmt};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{NodeTag, ProcessTag};

/// Size of a raw [`Sid`] in bytes.
pub const SID_LEN: usize = 24;

/// Length of the text form of a [`Sid`]. 24 bytes encode to exactly 32
/// base64 characters, so no padding is ever emitted.
pub const ENCODED_LEN: usize = 32;

/// Width of the timestamp field in bits.
pub const TIMESTAMP_BITS: u32 = 56;
/// Mask selecting the timestamp field.
pub const TIMESTAMP_MASK: u64 = (1 << TIMESTAMP_BITS) - 1;
/// Width of the sequence field in bits.
pub const SEQUENCE_BITS: u32 = 12;
/// Mask selecting the sequence field.
pub const SEQUENCE_MASK: u16 = (1 << SEQUENCE_BITS) - 1;
/// Size of the trailing integrity field in bytes.
pub const CHECKSUM_LEN: usize = 8;

/// A 24-byte identifier.
///
/// The layout is a wire-compatibility contract, written byte by byte:
///
/// ```text
///   +------ 0 ------+------ 1 ------+------ 2 ------+------ 3 ------+
///   |                      time bits 0..32                          |
///   +---------------+---------------+---------------+---------------+
///   |       time bits 32..48        | time 48..56   | proc 0..8     |
///   +---------------+---------------+---------------+---------------+
///   |proc 8..12|seq 8..12| seq 0..8 |          node (0-1)           |
///   +---------------+---------------+---------------+---------------+
///   |                          node (2-5)                           |
///   +---------------+---------------+---------------+---------------+
///   |                       checksum (0-3)                          |
///   +---------------+---------------+---------------+---------------+
///   |                       checksum (4-7)                          |
///   +---------------+---------------+---------------+---------------+
/// ```
///
/// Each multi-byte group is big-endian: byte 0 holds time bits 24..32 and
/// byte 4 holds time bits 40..48.
///
/// Ordering compares `(timestamp, sequence)` first and falls back to the raw
/// bytes, so IDs sort by generation time. Within a single tick the sequence
/// starts at a random value and wraps at 4096, so IDs sharing a timestamp are
/// not necessarily in generation order.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Sid {
    bytes: [u8; SID_LEN],
}

impl Sid {
    /// Packs the fields into their byte positions.
    ///
    /// Fields wider than their slot are truncated to it.
    #[must_use]
    pub const fn from_parts(
        timestamp: u64,
        process: ProcessTag,
        sequence: u16,
        node: NodeTag,
        checksum: [u8; CHECKSUM_LEN],
    ) -> Self {
        let ts = timestamp & TIMESTAMP_MASK;
        let pid = process.get();
        let seq = sequence & SEQUENCE_MASK;
        let node = node.octets();

        let mut b = [0_u8; SID_LEN];

        // time_low
        b[0] = (ts >> 24) as u8;
        b[1] = (ts >> 16) as u8;
        b[2] = (ts >> 8) as u8;
        b[3] = ts as u8;

        // time_mid
        b[4] = (ts >> 40) as u8;
        b[5] = (ts >> 32) as u8;

        // time_hi_and_pid_low
        b[6] = (ts >> 48) as u8;
        b[7] = pid as u8;

        // seq_hi_and_pid_hi
        b[8] = (((pid >> 8) as u8) << 4) | (((seq >> 8) as u8) & 0x0F);

        // seq_low
        b[9] = seq as u8;

        let mut i = 0;
        while i < node.len() {
            b[10 + i] = node[i];
            i += 1;
        }

        let mut i = 0;
        while i < CHECKSUM_LEN {
            b[16 + i] = checksum[i];
            i += 1;
        }

        Self { bytes: b }
    }

    /// Wraps raw bytes, e.g. ones captured from storage.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SID_LEN]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; SID_LEN] {
        self.bytes
    }

    /// Borrows the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SID_LEN] {
        &self.bytes
    }

    /// Ticks (100ns) since the generating clock's epoch.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        let b = &self.bytes;
        ((b[6] as u64) << 48)
            | ((b[4] as u64) << 40)
            | ((b[5] as u64) << 32)
            | ((b[0] as u64) << 24)
            | ((b[1] as u64) << 16)
            | ((b[2] as u64) << 8)
            | (b[3] as u64)
    }

    /// Tag of the process that generated this ID.
    #[must_use]
    pub const fn process_tag(&self) -> ProcessTag {
        let hi = (self.bytes[8] >> 4) as u16;
        ProcessTag::from_raw((hi << 8) | self.bytes[7] as u16)
    }

    /// Intra-tick sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u16 {
        (((self.bytes[8] & 0x0F) as u16) << 8) | self.bytes[9] as u16
    }

    /// Tag of the host that generated this ID.
    #[must_use]
    pub const fn node_tag(&self) -> NodeTag {
        let b = &self.bytes;
        NodeTag::new([b[10], b[11], b[12], b[13], b[14], b[15]])
    }

    /// The trailing integrity field.
    #[must_use]
    pub const fn checksum(&self) -> [u8; CHECKSUM_LEN] {
        let b = &self.bytes;
        [b[16], b[17], b[18], b[19], b[20], b[21], b[22], b[23]]
    }

    /// Encodes into the provided buffer without allocating and returns the
    /// text as a `&str` borrowed from it.
    ///
    /// # Example
    /// ```
    /// use sid::{ENCODED_LEN, Sid};
    ///
    /// let id = Sid::from_bytes([0xFB; 24]);
    /// let mut buf = [0_u8; ENCODED_LEN];
    /// assert_eq!(id.encode_to_buf(&mut buf), "-_v7-_v7-_v7-_v7-_v7-_v7-_v7-_v7");
    /// ```
    pub fn encode_to_buf<'a>(&self, buf: &'a mut [u8; ENCODED_LEN]) -> &'a str {
        match URL_SAFE_NO_PAD.encode_slice(self.bytes, buf) {
            Ok(written) => debug_assert_eq!(written, ENCODED_LEN),
            Err(_) => unreachable!("24 bytes always encode to 32 characters"),
        }
        match core::str::from_utf8(buf) {
            Ok(s) => s,
            Err(_) => unreachable!("base64 output is ASCII"),
        }
    }

    /// Encodes into a freshly allocated 32-character [`String`].
    #[must_use]
    pub fn encode(&self) -> String {
        let mut buf = [0_u8; ENCODED_LEN];
        self.encode_to_buf(&mut buf).to_owned()
    }
}

impl Ord for Sid {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp()
            .cmp(&other.timestamp())
            .then_with(|| self.sequence().cmp(&other.sequence()))
            .then_with(|| self.bytes.cmp(&other.bytes))
    }
}

impl PartialOrd for Sid {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0_u8; ENCODED_LEN];
        f.write_str(self.encode_to_buf(&mut buf))
    }
}

impl fmt::Debug for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sid")
            .field("timestamp", &self.timestamp())
            .field("process_tag", &self.process_tag())
            .field("sequence", &self.sequence())
            .field("node_tag", &self.node_tag())
            .field("checksum", &self.checksum())
            .finish()
    }
}

impl From<Sid> for [u8; SID_LEN] {
    fn from(id: Sid) -> Self {
        id.bytes
    }
}

impl From<[u8; SID_LEN]> for Sid {
    fn from(bytes: [u8; SID_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for Sid {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODE: NodeTag = NodeTag::new([0x01, 0x23, 0x45, 0x67, 0x89, 0xAB]);

    fn sample() -> Sid {
        Sid::from_parts(
            0x00AB_CDEF_0123_4567,
            ProcessTag::from_raw(0x9A5),
            0x7C3,
            NODE,
            [1, 2, 3, 4, 5, 6, 7, 8],
        )
    }

    #[test]
    fn packs_fields_at_documented_offsets() {
        let id = sample();
        assert_eq!(
            id.to_bytes(),
            [
                0x01, 0x23, 0x45, 0x67, // time bits 0..32
                0xCD, 0xEF, // time bits 32..48
                0xAB, // time bits 48..56
                0xA5, // pid low
                0x97, // pid hi nibble | seq hi nibble
                0xC3, // seq low
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, // node
                1, 2, 3, 4, 5, 6, 7, 8, // checksum
            ]
        );
    }

    #[test]
    fn accessors_read_back_packed_fields() {
        let id = sample();
        assert_eq!(id.timestamp(), 0x00AB_CDEF_0123_4567);
        assert_eq!(id.process_tag().get(), 0x9A5);
        assert_eq!(id.sequence(), 0x7C3);
        assert_eq!(id.node_tag(), NODE);
        assert_eq!(id.checksum(), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn oversized_fields_are_truncated() {
        let id = Sid::from_parts(u64::MAX, ProcessTag::from_raw(0xFFF), u16::MAX, NODE, [0; 8]);
        assert_eq!(id.timestamp(), TIMESTAMP_MASK);
        assert_eq!(id.sequence(), SEQUENCE_MASK);
        assert_eq!(id.process_tag().get(), 0xFFF);
    }

    #[test]
    fn encoding_is_fixed_length_url_safe_without_padding() {
        for seed in [0x00_u8, 0x3E, 0x3F, 0x7F, 0xFB, 0xFF] {
            let encoded = Sid::from_bytes([seed; SID_LEN]).encode();
            assert_eq!(encoded.len(), ENCODED_LEN);
            assert!(!encoded.contains('='));
            assert!(
                encoded
                    .bytes()
                    .all(|c| c.is_ascii_alphanumeric() || c == b'-' || c == b'_'),
                "unexpected character in {encoded}"
            );
        }
    }

    #[test]
    fn encoding_matches_reference_base64() {
        let id = sample();
        let reference = URL_SAFE_NO_PAD.encode(id.as_bytes());
        assert_eq!(id.encode(), reference);
        assert_eq!(id.to_string(), reference);
    }

    #[test]
    fn ordering_follows_timestamp_then_sequence() {
        let at = |ts: u64, seq: u16, byte: u8| {
            Sid::from_parts(ts, ProcessTag::from_raw(0), seq, NODE, [byte; 8])
        };

        assert!(at(1, 4095, 0xFF) < at(2, 0, 0x00));
        assert!(at(2, 0, 0xFF) < at(2, 1, 0x00));
        assert!(at(2, 1, 0x00) < at(2, 1, 0x01));

        // Raw bytes put the low time word first, so byte order alone would
        // misorder these two.
        assert!(at(0x0001_0000_0000, 0, 0) > at(0x0000_FFFF_FFFF, 0, 0));
    }
}
