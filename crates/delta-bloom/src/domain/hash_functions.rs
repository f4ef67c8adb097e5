//! Keyed hash for the layered filter
//!
//! The filter uses exactly one hash function. A single set bit per entry
//! costs some false positive rate for a given layer size, but leaves layers
//! sparse enough to compress well when shipped as deltas.
//!
//! SipHash-2-4 (128-bit output, truncated to the low 64 bits) keyed with a
//! per-instance secret keeps positions unpredictable to anyone without the
//! key.

use siphasher::sip128::{Hasher128, SipHasher};
use std::hash::Hasher;

/// Secret hash key: two 64-bit sub-keys
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FilterKey {
    k0: u64,
    k1: u64,
}

impl FilterKey {
    /// Length of raw key material in bytes
    pub const LEN: usize = 16;

    /// Split 16 bytes of key material into two big-endian sub-keys
    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        let mut k0 = [0u8; 8];
        let mut k1 = [0u8; 8];
        k0.copy_from_slice(&bytes[..8]);
        k1.copy_from_slice(&bytes[8..]);
        Self {
            k0: u64::from_be_bytes(k0),
            k1: u64::from_be_bytes(k1),
        }
    }

    /// The two sub-keys
    pub fn sub_keys(&self) -> (u64, u64) {
        (self.k0, self.k1)
    }
}

// Never print key material.
impl std::fmt::Debug for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FilterKey(..)")
    }
}

/// A keyed pseudorandom function producing 64-bit digests
pub trait KeyedHash {
    /// Deterministic digest of `value` under this hasher's key
    fn hash64(&self, value: &[u8]) -> u64;
}

/// SipHash-2-4-128 keyed hasher
#[derive(Clone, Debug)]
pub struct SipKeyedHasher {
    key: FilterKey,
}

impl SipKeyedHasher {
    pub fn new(key: FilterKey) -> Self {
        Self { key }
    }
}

impl KeyedHash for SipKeyedHasher {
    fn hash64(&self, value: &[u8]) -> u64 {
        let (k0, k1) = self.key.sub_keys();
        let mut hasher = SipHasher::new_with_keys(k0, k1);
        hasher.write(value);
        hasher.finish128().h1
    }
}

/// Map `value` to a bit position in `[0, mask]`
pub fn hash_position<H: KeyedHash + ?Sized>(hasher: &H, value: &[u8], mask: u64) -> usize {
    (hasher.hash64(value) & mask) as usize
}
