use sha1::{Digest, Sha1};

use crate::HashSource;

/// SHA-1 truncated to 64 bits.
///
/// The 55-byte input the generator hashes fits in a single SHA-1 block once
/// padded, so each digest costs one compression.
#[derive(Default, Clone, Copy, Debug)]
pub struct Sha1Hash;

impl HashSource for Sha1Hash {
    fn digest64(&self, input: &[u8]) -> [u8; 8] {
        let digest = Sha1::digest(input);
        let mut out = [0_u8; 8];
        out.copy_from_slice(&digest[..8]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_sha1_prefix() {
        // SHA-1("abc") = a9993e364706816aba3e25717850c26c9cd0d89d
        assert_eq!(
            Sha1Hash.digest64(b"abc"),
            [0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a]
        );
        // SHA-1("") = da39a3ee5e6b4b0d3255bfef95601890afd80709
        assert_eq!(
            Sha1Hash.digest64(b""),
            [0xda, 0x39, 0xa3, 0xee, 0x5e, 0x6b, 0x4b, 0x0d]
        );
    }

    #[test]
    fn different_inputs_differ() {
        let a = Sha1Hash.digest64(&[0_u8; 55]);
        let mut input = [0_u8; 55];
        input[54] = 1;
        assert_ne!(a, Sha1Hash.digest64(&input));
    }
}
