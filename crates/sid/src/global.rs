use std::sync::OnceLock;

use crate::{LockSidGenerator, Sha1Hash, Sid, SystemClock, ThreadRandom};

/// The generator behind [`sid()`] and [`sid_string()`]: wall clock from the
/// Unix epoch, thread-local RNG and SHA-1.
pub type DefaultSidGenerator = LockSidGenerator<SystemClock, ThreadRandom, Sha1Hash>;

static DEFAULT: OnceLock<DefaultSidGenerator> = OnceLock::new();

/// Returns the process-wide generator, creating it on first use.
///
/// Code that wants isolation (tests, multiple ID spaces) should construct its
/// own generator instead.
pub fn default_generator() -> &'static DefaultSidGenerator {
    DEFAULT.get_or_init(|| LockSidGenerator::new(SystemClock::default(), ThreadRandom, Sha1Hash))
}

/// Generates a [`Sid`] from the process-wide generator.
///
/// # Example
/// ```
/// let a = sid::sid();
/// let b = sid::sid();
/// assert_ne!(a, b);
/// ```
pub fn sid() -> Sid {
    default_generator().next_id()
}

/// Generates a 32-character ID string from the process-wide generator.
///
/// # Example
/// ```
/// let id = sid::sid_string();
/// assert_eq!(id.len(), 32);
/// ```
pub fn sid_string() -> String {
    default_generator().next_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Identity;
    use std::collections::HashSet;

    #[test]
    fn default_generator_is_shared() {
        assert!(core::ptr::eq(default_generator(), default_generator()));
    }

    #[test]
    fn default_ids_carry_process_identity() {
        let identity = Identity::current();
        let id = sid();
        assert_eq!(id.process_tag(), identity.process);
        assert_eq!(id.node_tag(), identity.node);
    }

    #[test]
    fn default_strings_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| sid_string()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
