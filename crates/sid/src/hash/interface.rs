/// A one-way hash whose digest is truncated to its leading 8 bytes.
///
/// The generator feeds it a 55-byte buffer (timestamp, salt counter and salt)
/// and stores the result in the integrity field of every ID that is not a
/// salt rotation.
///
/// # Example
/// ```
/// use sid::HashSource;
///
/// struct Prefix;
/// impl HashSource for Prefix {
///     fn digest64(&self, input: &[u8]) -> [u8; 8] {
///         let mut out = [0_u8; 8];
///         let n = input.len().min(8);
///         out[..n].copy_from_slice(&input[..n]);
///         out
///     }
/// }
///
/// assert_eq!(Prefix.digest64(b"abcdefghij"), *b"abcdefgh");
/// ```
pub trait HashSource {
    /// Hashes `input` and returns the first 8 bytes of the digest.
    fn digest64(&self, input: &[u8]) -> [u8; 8];
}
