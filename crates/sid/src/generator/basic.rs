use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Config, HashSource, Identity, RandSource, Sid, SidGenerator, TimeSource, generator::state::State,
};

/// A [`Sid`] generator for single-threaded environments.
///
/// This generator is lightweight and fast, but is not thread-safe: its state
/// lives in a [`Cell`], so it is `!Sync`.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Unique per `(timestamp, sequence)` within the generator
/// - ✅ Never blocks: exhausted ticks roll forward without waiting
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - Each worker thread owns its own generator
///
/// ## See Also
/// - [`LockSidGenerator`]
///
/// [`LockSidGenerator`]: crate::LockSidGenerator
pub struct BasicSidGenerator<T, R, H>
where
    T: TimeSource,
    R: RandSource,
    H: HashSource,
{
    state: Cell<State>,
    identity: Identity,
    rotation_secs: i64,
    time: T,
    rng: R,
    hash: H,
}

impl<T, R, H> BasicSidGenerator<T, R, H>
where
    T: TimeSource,
    R: RandSource,
    H: HashSource,
{
    /// Creates a new [`BasicSidGenerator`] for the current process.
    ///
    /// # Parameters
    /// - `time`: A [`TimeSource`] used to retrieve the current time
    /// - `rng`: A [`RandSource`] used for sequence starts and salts
    /// - `hash`: A [`HashSource`] used for the integrity field
    ///
    /// # Example
    /// ```
    /// use sid::{BasicSidGenerator, MonotonicClock, Sha1Hash, ThreadRandom};
    ///
    /// let generator = BasicSidGenerator::new(MonotonicClock::default(), ThreadRandom, Sha1Hash);
    /// let a = generator.next_id();
    /// let b = generator.next_id();
    /// assert_ne!(a, b);
    /// assert!(a.timestamp() <= b.timestamp());
    /// ```
    pub fn new(time: T, rng: R, hash: H) -> Self {
        Self::from_components(Identity::current(), Config::default(), time, rng, hash)
    }

    /// Creates a new generator from explicit parts.
    ///
    /// Useful to pin the process and node tags, e.g. in tests or when the
    /// host already knows its node identity. `config` is used as given; call
    /// [`Config::validate`] first if it comes from user input.
    pub fn from_components(identity: Identity, config: Config, time: T, rng: R, hash: H) -> Self {
        Self {
            state: Cell::new(State::new(&rng)),
            identity,
            rotation_secs: config.salt_rotation_secs_i64(),
            time,
            rng,
            hash,
        }
    }

    /// Generates a new [`Sid`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Sid {
        let mut state = self.state.get();
        let now = self.time.current_time();
        let reservation = state.reserve(now, self.rotation_secs, &self.rng);
        self.state.set(state);

        let (id, fresh_salt) = reservation.into_sid(&self.identity, &self.rng, &self.hash);
        if let Some(salt) = fresh_salt {
            let mut state = self.state.get();
            state.publish_salt(salt);
            self.state.set(state);
        }
        id
    }

    /// Generates a new [`Sid`] in its 32-character text form.
    pub fn next_string(&self) -> String {
        self.next_id().encode()
    }

    /// The identity stamped into every ID.
    pub fn identity(&self) -> Identity {
        self.identity
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> State {
        self.state.get()
    }
}

impl<T, R, H> SidGenerator<T, R, H> for BasicSidGenerator<T, R, H>
where
    T: TimeSource,
    R: RandSource,
    H: HashSource,
{
    fn new(time: T, rng: R, hash: H) -> Self {
        Self::new(time, rng, hash)
    }

    fn from_components(identity: Identity, config: Config, time: T, rng: R, hash: H) -> Self {
        Self::from_components(identity, config, time, rng, hash)
    }

    fn next_id(&self) -> Sid {
        self.next_id()
    }
}
