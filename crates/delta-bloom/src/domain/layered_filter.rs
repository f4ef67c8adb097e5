//! Layered delta filter
//!
//! An ordered stack of bit layers, newest first. Membership is the OR of
//! every retained layer; insertion only ever touches the head. Exporting
//! freezes the head and starts a fresh one, so each exported layer holds
//! exactly the entries recorded since the previous export.
//!
//! INVARIANTS:
//! - INVARIANT-1: At least one layer (the head) is always retained
//! - INVARIANT-2: All layers have the same length, fixed at construction
//! - INVARIANT-3: No false negatives while the layer holding a value is retained
//! - INVARIANT-4: `entries()` only decreases when expiry drops a layer

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::bit_layer::BitLayer;
use super::config::FilterConfig;
use super::hash_functions::{hash_position, FilterKey, SipKeyedHasher};
use super::parameters::{expiry_pressure, layer_bits, layer_fpr, position_mask, union_fpr};
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::EntropySource;

/// Probabilistic set with delta export and merge
#[derive(Clone)]
pub struct LayeredFilter {
    hasher: SipKeyedHasher,
    config: FilterConfig,
    /// `2^size_exponent - 1`
    mask: u64,
    /// Maximum entries before expiry starts dropping layers
    capacity: usize,
    /// Head (index 0) is the mutable layer; the oldest layer is last
    layers: VecDeque<BitLayer>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl LayeredFilter {
    /// Create a filter with `2^size_exponent`-bit layers sized for
    /// `floor(2^size_exponent * load_factor)` entries.
    ///
    /// Reads 16 bytes of key material from `entropy`.
    pub fn new<E: EntropySource>(
        entropy: E,
        size_exponent: u32,
        load_factor: f64,
    ) -> Result<Self, FilterError> {
        Self::from_config(
            entropy,
            FilterConfig {
                size_exponent,
                load_factor,
            },
        )
    }

    /// Create a filter from a validated configuration
    pub fn from_config<E: EntropySource>(
        mut entropy: E,
        config: FilterConfig,
    ) -> Result<Self, FilterError> {
        config.validate()?;
        let capacity = config.capacity()?;

        let mut key = [0u8; FilterKey::LEN];
        entropy.fill_bytes(&mut key)?;

        let head = BitLayer::try_new(config.layer_bytes()).map_err(|_| {
            warn!(
                size_exponent = config.size_exponent,
                layer_bytes = config.layer_bytes(),
                "Cannot allocate filter layer"
            );
            FilterError::FilterTooLarge {
                size_exponent: config.size_exponent,
                max: config.size_exponent - 1,
            }
        })?;
        let mut layers = VecDeque::new();
        layers.push_back(head);

        debug!(
            size_exponent = config.size_exponent,
            layer_bytes = config.layer_bytes(),
            capacity,
            "Created layered filter"
        );

        Ok(Self {
            hasher: SipKeyedHasher::new(FilterKey::from_bytes(key)),
            config,
            mask: position_mask(config.size_exponent),
            capacity,
            layers,
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Attach a metrics recorder
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Maximum capacity of the filter
    pub fn max_entries(&self) -> usize {
        self.capacity
    }

    /// Number of entries across all retained layers
    pub fn entries(&self) -> usize {
        self.layers.iter().map(BitLayer::entries).sum()
    }

    /// Test membership of `value`.
    ///
    /// Returns true if any retained layer has the value's bit set (which
    /// may be a false positive). Never mutates the filter.
    pub fn test(&self, value: &[u8]) -> bool {
        self.contains_position(self.position(value))
    }

    /// Test membership of `value` and insert it if absent.
    ///
    /// Returns true iff the value was present at the time of the call. An
    /// absent value is recorded in the head layer only.
    pub fn test_and_set(&mut self, value: &[u8]) -> bool {
        let position = self.position(value);
        if self.contains_position(position) {
            self.metrics.record_lookup(true);
            return true;
        }
        self.metrics.record_lookup(false);

        if let Some(head) = self.layers.front_mut() {
            head.set_bit(position);
            head.record_entry();
            self.metrics.record_insert();
        }
        false
    }

    /// Freeze the head layer and start a new empty one.
    ///
    /// Returns the raw bytes of the frozen layer: every entry recorded since
    /// the previous export (or since construction). The bytes are captured
    /// before the expiry check, so they are returned even if expiry drops
    /// the frozen layer straight away.
    pub fn export_delta(&mut self) -> Vec<u8> {
        self.layers.push_front(BitLayer::new(self.config.layer_bytes()));

        let (delta, bits_set) = match self.layers.get(1) {
            Some(frozen) => (frozen.to_bytes(), frozen.population_count()),
            None => (vec![0u8; self.config.layer_bytes()], 0),
        };
        self.metrics.record_export(bits_set);

        debug!(
            layers = self.layers.len(),
            bits_set,
            entries = self.entries(),
            "Exported delta layer"
        );

        self.check_expiry();
        delta
    }

    /// Merge a layer received from a peer.
    ///
    /// The layer goes in at the head and becomes the working layer, so
    /// subsequent insertions land in it. Its entry count is its population
    /// count, since the peer's insertion count is not transmitted.
    ///
    /// Fails with `LayerSizeMismatch`, leaving the filter untouched, if
    /// `bytes` is not exactly one layer long.
    pub fn import_layer(&mut self, bytes: &[u8]) -> Result<(), FilterError> {
        let expected = self.config.layer_bytes();
        if bytes.len() != expected {
            warn!(
                expected,
                actual = bytes.len(),
                "Rejected imported layer with wrong size"
            );
            return Err(FilterError::LayerSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let layer = BitLayer::from_bytes(bytes.to_vec());
        let bits_set = layer.entries();
        self.layers.push_front(layer);
        self.metrics.record_import(bits_set);

        debug!(
            layers = self.layers.len(),
            bits_set,
            entries = self.entries(),
            "Imported layer"
        );

        self.check_expiry();
        Ok(())
    }

    /// Number of retained layers, head included
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Entry counts per layer, head first
    pub fn layer_entries(&self) -> Vec<usize> {
        self.layers.iter().map(BitLayer::entries).collect()
    }

    /// Exact byte length of one layer on the wire
    pub fn layer_bytes(&self) -> usize {
        self.config.layer_bytes()
    }

    /// Configuration this filter was built from
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Current false positive rate of the union of retained layers,
    /// derived from each layer's fill ratio.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let m = layer_bits(self.config.size_exponent);
        union_fpr(
            self.layers
                .iter()
                .map(|layer| layer_fpr(layer.population_count(), m)),
        )
    }

    fn position(&self, value: &[u8]) -> usize {
        hash_position(&self.hasher, value, self.mask)
    }

    fn contains_position(&self, position: usize) -> bool {
        self.layers.iter().any(|layer| layer.test_bit(position))
    }

    /// Drop the oldest layer once `entries * (L + 1) / L >= capacity`.
    ///
    /// At most one layer is dropped per call, and never the head.
    fn check_expiry(&mut self) {
        let layer_count = self.layers.len();
        if layer_count < 2 {
            return;
        }

        let entries = self.entries();
        if expiry_pressure(entries, layer_count) < self.capacity as f64 {
            return;
        }

        if let Some(dropped) = self.layers.pop_back() {
            self.metrics.record_expiry(dropped.entries());
            info!(
                entries_dropped = dropped.entries(),
                entries_remaining = entries - dropped.entries(),
                layers = self.layers.len(),
                capacity = self.capacity,
                "Expired oldest layer"
            );
        }
    }
}

impl std::fmt::Debug for LayeredFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredFilter")
            .field("config", &self.config)
            .field("capacity", &self.capacity)
            .field("layer_entries", &self.layer_entries())
            .finish_non_exhaustive()
    }
}
