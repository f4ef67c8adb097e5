//! Bit layer: one epoch of the layered filter
//!
//! Bit `p` is stored at byte `p / 8`, bit `p & 7` (LSB first). The raw byte
//! slice is the wire format exchanged between peers.

use std::collections::TryReserveError;

use bitvec::prelude::*;

/// Fixed-length bit array plus the number of entries recorded in it
///
/// Positions are masked by the owning filter, so every position passed in
/// is below `8 * len_bytes`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BitLayer {
    bits: BitVec<u8, Lsb0>,
    /// Entries inserted into this layer (or its population count if imported)
    entries: usize,
}

impl BitLayer {
    /// Create an empty layer of `len_bytes` bytes
    pub fn new(len_bytes: usize) -> Self {
        Self {
            bits: BitVec::from_vec(vec![0u8; len_bytes]),
            entries: 0,
        }
    }

    /// Create an empty layer, reporting allocation failure instead of
    /// aborting.
    pub fn try_new(len_bytes: usize) -> Result<Self, TryReserveError> {
        let mut raw = Vec::new();
        raw.try_reserve_exact(len_bytes)?;
        raw.resize(len_bytes, 0u8);
        Ok(Self {
            bits: BitVec::from_vec(raw),
            entries: 0,
        })
    }

    /// Wrap bytes received from a peer.
    ///
    /// The insertion count of a foreign layer is not transmitted, so it is
    /// taken to be the population count.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let bits = BitVec::from_vec(bytes);
        let entries = bits.count_ones();
        Self { bits, entries }
    }

    /// Whether the bit at `position` is set
    pub fn test_bit(&self, position: usize) -> bool {
        self.bits.get(position).map(|bit| *bit).unwrap_or(false)
    }

    /// Set the bit at `position`. Setting a set bit is a no-op.
    pub fn set_bit(&mut self, position: usize) {
        if let Some(mut bit) = self.bits.get_mut(position) {
            *bit = true;
        }
    }

    /// Number of set bits
    pub fn population_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Entries recorded in this layer
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Record one inserted entry
    pub fn record_entry(&mut self) {
        self.entries += 1;
    }

    /// Raw backing bytes (wire format)
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Copy out the raw backing bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}
