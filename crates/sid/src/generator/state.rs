use core::{cmp::Ordering, time::Duration};

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::{
    CHECKSUM_LEN, HashSource, Identity, RandSource, SEQUENCE_MASK, Sid, TIMESTAMP_MASK, to_ticks,
};

/// Salt length. `8 + 4 + 43 = 55` bytes of digest input is the largest
/// message SHA-1 pads into a single 64-byte block.
pub const SALT_LEN: usize = 43;

/// Length of the buffer hashed into the integrity field.
pub const DIGEST_INPUT_LEN: usize = 8 + 4 + SALT_LEN;

/// Mutable generator state. Everything here is guarded by the generator's
/// lock (or owned by a single thread for the basic generator).
#[derive(Clone, Copy, Debug)]
pub(crate) struct State {
    /// Timestamp of the last issued ID. May run ahead of the clock after a
    /// tick is exhausted.
    last_timestamp: u64,
    /// Raw clock reading at the last call.
    last_clock: u64,
    last_sequence: u16,
    /// Where the sequence restarts on every new tick. Re-randomized when the
    /// clock goes backward.
    sequence_start: u16,
    salt: [u8; SALT_LEN],
    /// Whole seconds at the last salt rotation.
    salt_rotated_at: i64,
    salt_counter: u32,
}

/// What the integrity field of a reserved ID will be built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Integrity {
    /// Rotation is due: draw a fresh salt and use its first bytes verbatim.
    Rotate,
    /// Hash the timestamp, counter and a snapshot of the current salt.
    Digest { counter: u32, salt: [u8; SALT_LEN] },
}

/// The outcome of one pass through the locked section. Owns copies of
/// everything it needs, so the rest of the work runs without the lock.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Reservation {
    pub(crate) timestamp: u64,
    pub(crate) sequence: u16,
    pub(crate) integrity: Integrity,
}

impl State {
    pub(crate) fn new<R: RandSource>(rng: &R) -> Self {
        let sequence_start = random_sequence(rng);
        let salt_counter = rng.rand_u32();
        // Calls racing the first rotation hash with this salt until the
        // rotated one is published.
        let mut salt = [0_u8; SALT_LEN];
        rng.fill_bytes(&mut salt);
        Self {
            last_timestamp: 0,
            last_clock: 0,
            last_sequence: sequence_start,
            sequence_start,
            salt,
            // Forces a rotation on the first call.
            salt_rotated_at: i64::MIN,
            salt_counter,
        }
    }

    /// Arbitrates the next `(timestamp, sequence)` pair for a clock reading
    /// and decides where the integrity field comes from.
    pub(crate) fn reserve<R: RandSource>(
        &mut self,
        now: Duration,
        rotation_secs: i64,
        rng: &R,
    ) -> Reservation {
        let candidate = to_ticks(now) & TIMESTAMP_MASK;

        let (timestamp, sequence) = match candidate.cmp(&self.last_timestamp) {
            Ordering::Greater => {
                self.last_timestamp = candidate;
                self.last_sequence = self.sequence_start;
                (candidate, self.sequence_start)
            }
            Ordering::Equal => self.next_in_tick(),
            // The clock has not moved backward, the generator is only ahead
            // of it because of forced advances. Keep counting on our tick.
            Ordering::Less if candidate >= self.last_clock => self.next_in_tick(),
            Ordering::Less => self.cold_clock_behind(candidate, rng),
        };
        self.last_clock = candidate;

        let now_secs = i64::try_from(now.as_secs()).unwrap_or(i64::MAX);
        let rotate = now_secs >= self.salt_rotated_at.saturating_add(rotation_secs);
        if rotate {
            self.salt_rotated_at = now_secs;
        }
        self.salt_counter = self.salt_counter.wrapping_add(1);

        let integrity = if rotate {
            #[cfg(feature = "tracing")]
            debug!(at = now_secs, "salt rotation due");
            Integrity::Rotate
        } else {
            Integrity::Digest {
                counter: self.salt_counter,
                salt: self.salt,
            }
        };

        Reservation {
            timestamp,
            sequence,
            integrity,
        }
    }

    /// Installs a freshly drawn salt.
    pub(crate) fn publish_salt(&mut self, salt: [u8; SALT_LEN]) {
        self.salt = salt;
    }

    fn next_in_tick(&mut self) -> (u64, u16) {
        let sequence = (self.last_sequence + 1) & SEQUENCE_MASK;
        self.last_sequence = sequence;
        if sequence == self.sequence_start {
            return self.cold_tick_exhausted();
        }
        (self.last_timestamp, sequence)
    }

    /// All 4096 sequence values of the current tick are used. Moves to the
    /// next tick without waiting for the clock and without re-randomizing the
    /// sequence start.
    #[cold]
    #[inline(never)]
    fn cold_tick_exhausted(&mut self) -> (u64, u16) {
        self.last_timestamp += 1;
        #[cfg(feature = "tracing")]
        debug!(timestamp = self.last_timestamp, "sequence exhausted, forcing next tick");
        (self.last_timestamp, self.last_sequence)
    }

    /// The clock stepped backward. Starts a fresh sequence epoch at the
    /// earlier timestamp rather than blocking.
    #[cold]
    #[inline(never)]
    fn cold_clock_behind<R: RandSource>(&mut self, candidate: u64, rng: &R) -> (u64, u16) {
        #[cfg(feature = "tracing")]
        debug!(
            now = candidate,
            last = self.last_timestamp,
            "clock moved backward, restarting sequence"
        );
        self.sequence_start = random_sequence(rng);
        self.last_sequence = self.sequence_start;
        self.last_timestamp = candidate;
        (candidate, self.sequence_start)
    }

    #[cfg(test)]
    pub(crate) fn sequence_start(&self) -> u16 {
        self.sequence_start
    }

    #[cfg(test)]
    pub(crate) fn salt(&self) -> [u8; SALT_LEN] {
        self.salt
    }
}

impl Reservation {
    /// Builds the ID. Runs outside the lock.
    ///
    /// Returns the new salt alongside the ID when this reservation rotated it;
    /// the caller must publish it back into the shared state.
    pub(crate) fn into_sid<R, H>(
        self,
        identity: &Identity,
        rng: &R,
        hash: &H,
    ) -> (Sid, Option<[u8; SALT_LEN]>)
    where
        R: RandSource,
        H: HashSource,
    {
        let (checksum, fresh_salt) = match self.integrity {
            Integrity::Rotate => {
                let mut salt = [0_u8; SALT_LEN];
                rng.fill_bytes(&mut salt);
                let mut checksum = [0_u8; CHECKSUM_LEN];
                checksum.copy_from_slice(&salt[..CHECKSUM_LEN]);
                (checksum, Some(salt))
            }
            Integrity::Digest { counter, salt } => {
                let input = digest_input(self.timestamp, counter, &salt);
                (hash.digest64(&input), None)
            }
        };

        let id = Sid::from_parts(
            self.timestamp,
            identity.process,
            self.sequence,
            identity.node,
            checksum,
        );
        (id, fresh_salt)
    }
}

/// `timestamp (8, BE) | counter (4, BE) | salt (43)`.
pub(crate) fn digest_input(
    timestamp: u64,
    counter: u32,
    salt: &[u8; SALT_LEN],
) -> [u8; DIGEST_INPUT_LEN] {
    let mut buf = [0_u8; DIGEST_INPUT_LEN];
    buf[..8].copy_from_slice(&timestamp.to_be_bytes());
    buf[8..12].copy_from_slice(&counter.to_be_bytes());
    buf[12..].copy_from_slice(salt);
    buf
}

fn random_sequence<R: RandSource>(rng: &R) -> u16 {
    (rng.rand_u32() & u32::from(SEQUENCE_MASK)) as u16
}
