use crate::RandSource;
use rand::{Rng, RngCore, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded periodically.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads are
/// contention-free and safe. This type does **not** store the RNG itself; it
/// simply accesses the thread-local generator on each call, which makes it
/// `Send + Sync` even though `ThreadRng` is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand_u32(&self) -> u32 {
        rng().random()
    }

    fn fill_bytes(&self, dest: &mut [u8]) {
        rng().fill_bytes(dest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_whole_buffer() {
        // 64 zero bytes from a secure RNG would be a 2^-512 event.
        let mut buf = [0_u8; 64];
        ThreadRandom.fill_bytes(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn integers_vary() {
        let draws: Vec<u32> = (0..16).map(|_| ThreadRandom.rand_u32()).collect();
        assert!(draws.iter().any(|&d| d != draws[0]));
    }
}
