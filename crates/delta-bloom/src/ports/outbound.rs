//! Outbound Ports (Driven Ports)
//!
//! These traits define dependencies that the layered filter needs from its
//! host. The filter never hard-wires a random generator; the host injects
//! one at construction so tests can substitute a deterministic source.

use crate::error::EntropyError;

/// Source of key material (Driven Port)
///
/// Read once at construction to derive the 128-bit hash key. May block on
/// the underlying entropy pool.
///
/// # Example Implementation
///
/// ```rust
/// use delta_bloom::{EntropyError, EntropySource};
///
/// struct Zeroes;
///
/// impl EntropySource for Zeroes {
///     fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
///         dest.fill(0);
///         Ok(())
///     }
/// }
/// ```
pub trait EntropySource {
    /// Fill `dest` entirely with random bytes, or fail
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_bytes(dest)
    }
}
