/// A trait for random sources that return random integers and bytes.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Implementations used for production IDs should be
/// cryptographically secure, since salts are drawn from them.
///
/// # Example
/// ```
/// use sid::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn rand_u32(&self) -> u32 {
///         1234
///     }
///
///     fn fill_bytes(&self, dest: &mut [u8]) {
///         dest.fill(0xAB);
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand_u32(), 1234);
///
/// let mut buf = [0_u8; 4];
/// rng.fill_bytes(&mut buf);
/// assert_eq!(buf, [0xAB; 4]);
/// ```
pub trait RandSource {
    /// Returns a uniformly distributed 32-bit integer.
    fn rand_u32(&self) -> u32;

    /// Fills `dest` with uniformly distributed bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}
