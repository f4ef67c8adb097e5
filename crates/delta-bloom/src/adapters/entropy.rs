//! Entropy Source Adapters

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::EntropyError;
use crate::ports::EntropySource;

/// Production entropy source backed by the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl OsEntropy {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng.try_fill_bytes(dest).map_err(EntropyError::from)
    }
}

/// Entropy source wrapping any `rand` generator.
///
/// With a seeded generator the derived key is reproducible, which is what
/// deterministic tests want and how two peers can end up with the same key.
///
/// # Example
///
/// ```rust
/// use delta_bloom::{LayeredFilter, RngEntropy};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let entropy = RngEntropy::new(StdRng::seed_from_u64(42));
/// let filter = LayeredFilter::new(entropy, 12, 0.125).expect("valid filter");
/// assert_eq!(filter.max_entries(), 512);
/// ```
#[derive(Debug, Clone)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: RngCore> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore> EntropySource for RngEntropy<R> {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        self.rng.try_fill_bytes(dest).map_err(EntropyError::from)
    }
}
