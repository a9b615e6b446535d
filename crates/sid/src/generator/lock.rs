use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Config, HashSource, Identity, RandSource, Sid, SidGenerator, TimeSource,
    generator::{
        mutex::{Mutex, lock},
        state::State,
    },
};

/// A lock-based [`Sid`] generator suitable for multi-threaded environments.
///
/// This generator wraps its state in an [`Arc<Mutex<_>>`]. Clones share that
/// state, so any number of threads can draw from one sequence.
///
/// The lock is held only to read the clock, arbitrate the `(timestamp,
/// sequence)` pair, decide on salt rotation and snapshot the salt. Packing,
/// hashing, salt sampling and encoding run outside it.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Unique per `(timestamp, sequence)` across all clones
/// - ✅ Never blocks beyond the short critical section
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - You want one ID space per process
///
/// ## See Also
/// - [`BasicSidGenerator`]
///
/// [`BasicSidGenerator`]: crate::BasicSidGenerator
#[derive(Clone)]
pub struct LockSidGenerator<T, R, H>
where
    T: TimeSource,
    R: RandSource,
    H: HashSource,
{
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<State>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<State>>,
    identity: Identity,
    rotation_secs: i64,
    time: T,
    rng: R,
    hash: H,
}

impl<T, R, H> LockSidGenerator<T, R, H>
where
    T: TimeSource,
    R: RandSource,
    H: HashSource,
{
    /// Creates a new [`LockSidGenerator`] for the current process.
    ///
    /// # Parameters
    /// - `time`: A [`TimeSource`] used to retrieve the current time
    /// - `rng`: A [`RandSource`] used for sequence starts and salts
    /// - `hash`: A [`HashSource`] used for the integrity field
    ///
    /// # Example
    /// ```
    /// use sid::{LockSidGenerator, Sha1Hash, SystemClock, ThreadRandom};
    ///
    /// let generator = LockSidGenerator::new(SystemClock::default(), ThreadRandom, Sha1Hash);
    ///
    /// let ids: Vec<_> = std::thread::scope(|s| {
    ///     let handles: Vec<_> = (0..4)
    ///         .map(|_| s.spawn(|| generator.next_id()))
    ///         .collect();
    ///     handles.into_iter().map(|h| h.join().unwrap()).collect()
    /// });
    ///
    /// for (i, a) in ids.iter().enumerate() {
    ///     for b in &ids[i + 1..] {
    ///         assert_ne!(a, b);
    ///     }
    /// }
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
        let state = Mutex::new(State::new(&rng));
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(state)),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(state),
            identity,
            rotation_secs: config.salt_rotation_secs_i64(),
            time,
            rng,
            hash,
        }
    }

    /// Generates a new [`Sid`].
    ///
    /// # Example
    /// ```
    /// use sid::{LockSidGenerator, Sha1Hash, SystemClock, ThreadRandom};
    ///
    /// let generator = LockSidGenerator::new(SystemClock::default(), ThreadRandom, Sha1Hash);
    /// let id = generator.next_id();
    /// assert_eq!(id.process_tag(), generator.identity().process);
    /// assert_eq!(id.node_tag(), generator.identity().node);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Sid {
        let reservation = {
            let mut state = lock(&self.state);
            let now = self.time.current_time();
            state.reserve(now, self.rotation_secs, &self.rng)
        };

        let (id, fresh_salt) = reservation.into_sid(&self.identity, &self.rng, &self.hash);
        if let Some(salt) = fresh_salt {
            lock(&self.state).publish_salt(salt);
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
        *lock(&self.state)
    }

    #[cfg(all(test, not(feature = "parking-lot")))]
    pub(crate) fn is_poisoned(&self) -> bool {
        self.state.is_poisoned()
    }
}

impl<T, R, H> SidGenerator<T, R, H> for LockSidGenerator<T, R, H>
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
