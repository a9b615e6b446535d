use crate::{Config, HashSource, Identity, RandSource, Sid, TimeSource};

/// A minimal interface for generating [`Sid`]s.
pub trait SidGenerator<T, R, H>
where
    T: TimeSource,
    R: RandSource,
    H: HashSource,
{
    /// Creates a new generator for the current process [`Identity`] with the
    /// default [`Config`].
    fn new(time: T, rng: R, hash: H) -> Self;

    /// Creates a new generator from explicit parts.
    fn from_components(identity: Identity, config: Config, time: T, rng: R, hash: H) -> Self;

    /// Returns the next ID. Never fails and never blocks.
    fn next_id(&self) -> Sid;

    /// Returns the next ID in its 32-character text form.
    fn next_string(&self) -> String {
        self.next_id().encode()
    }
}
