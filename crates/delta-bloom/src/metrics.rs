//! Metrics hooks for layered filter operations
//!
//! ## Usage
//!
//! ```
//! use delta_bloom::{LayeredFilter, Metrics, OsEntropy};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let mut filter = LayeredFilter::new(OsEntropy, 12, 0.125)
//!     .expect("valid filter")
//!     .with_metrics(metrics.clone());
//!
//! filter.test_and_set(b"value");
//! let _delta = filter.export_delta();
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.deltas_exported, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for layered filter operations
///
/// Thread-safe counters; one collector may be shared by many filters.
#[derive(Default)]
pub struct Metrics {
    /// Values newly recorded by `test_and_set`
    pub entries_inserted: AtomicU64,
    /// Membership lookups made by `test_and_set` (`test` records nothing)
    pub lookups_performed: AtomicU64,
    /// Lookups that reported the value as present
    pub lookups_positive: AtomicU64,
    /// Layers frozen and exported
    pub deltas_exported: AtomicU64,
    /// Bits set across all exported layers
    pub bits_exported: AtomicU64,
    /// Foreign layers merged
    pub layers_imported: AtomicU64,
    /// Bits set across all imported layers
    pub bits_imported: AtomicU64,
    /// Layers dropped by expiry
    pub layers_expired: AtomicU64,
    /// Entries lost with expired layers
    pub entries_expired: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value newly inserted into the head layer
    pub fn record_insert(&self) {
        self.entries_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a membership lookup
    ///
    /// # Arguments
    /// * `found` - Whether the value was reported present (possibly false positive)
    pub fn record_lookup(&self, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record an exported delta and its population count
    pub fn record_export(&self, bits_set: usize) {
        self.deltas_exported.fetch_add(1, Ordering::Relaxed);
        self.bits_exported.fetch_add(bits_set as u64, Ordering::Relaxed);
    }

    /// Record an imported layer and its population count
    pub fn record_import(&self, bits_set: usize) {
        self.layers_imported.fetch_add(1, Ordering::Relaxed);
        self.bits_imported.fetch_add(bits_set as u64, Ordering::Relaxed);
    }

    /// Record a layer dropped by expiry
    pub fn record_expiry(&self, entries_dropped: usize) {
        self.layers_expired.fetch_add(1, Ordering::Relaxed);
        self.entries_expired
            .fetch_add(entries_dropped as u64, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            entries_inserted: self.entries_inserted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            deltas_exported: self.deltas_exported.load(Ordering::Relaxed),
            bits_exported: self.bits_exported.load(Ordering::Relaxed),
            layers_imported: self.layers_imported.load(Ordering::Relaxed),
            bits_imported: self.bits_imported.load(Ordering::Relaxed),
            layers_expired: self.layers_expired.load(Ordering::Relaxed),
            entries_expired: self.entries_expired.load(Ordering::Relaxed),
        }
    }

    /// Ratio of positive lookups to total lookups.
    ///
    /// Includes both true positives and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.entries_inserted.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.deltas_exported.store(0, Ordering::Relaxed);
        self.bits_exported.store(0, Ordering::Relaxed);
        self.layers_imported.store(0, Ordering::Relaxed);
        self.bits_imported.store(0, Ordering::Relaxed);
        self.layers_expired.store(0, Ordering::Relaxed);
        self.entries_expired.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub entries_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub deltas_exported: u64,
    pub bits_exported: u64,
    pub layers_imported: u64,
    pub bits_imported: u64,
    pub layers_expired: u64,
    pub entries_expired: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus, StatsD, or OpenTelemetry.
pub trait MetricsRecorder: Send + Sync {
    /// Record a value newly inserted into the head layer
    fn record_insert(&self);

    /// Record a membership lookup
    fn record_lookup(&self, found: bool);

    /// Record an exported delta
    fn record_export(&self, bits_set: usize);

    /// Record an imported layer
    fn record_import(&self, bits_set: usize);

    /// Record a layer dropped by expiry
    fn record_expiry(&self, entries_dropped: usize);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_insert(&self) {}
    fn record_lookup(&self, _: bool) {}
    fn record_export(&self, _: usize) {}
    fn record_import(&self, _: usize) {}
    fn record_expiry(&self, _: usize) {}
}

impl MetricsRecorder for Metrics {
    fn record_insert(&self) {
        Metrics::record_insert(self);
    }

    fn record_lookup(&self, found: bool) {
        Metrics::record_lookup(self, found);
    }

    fn record_export(&self, bits_set: usize) {
        Metrics::record_export(self, bits_set);
    }

    fn record_import(&self, bits_set: usize) {
        Metrics::record_import(self, bits_set);
    }

    fn record_expiry(&self, entries_dropped: usize) {
        Metrics::record_expiry(self, entries_dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_record_lookups() {
        let metrics = Metrics::new();

        metrics.record_lookup(true);
        metrics.record_lookup(false);
        metrics.record_lookup(true);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.lookups_performed, 3);
        assert_eq!(snapshot.lookups_positive, 2);
    }

    #[test]
    fn test_record_layer_traffic() {
        let metrics = Metrics::new();

        metrics.record_export(120);
        metrics.record_export(80);
        metrics.record_import(50);
        metrics.record_expiry(120);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.deltas_exported, 2);
        assert_eq!(snapshot.bits_exported, 200);
        assert_eq!(snapshot.layers_imported, 1);
        assert_eq!(snapshot.bits_imported, 50);
        assert_eq!(snapshot.layers_expired, 1);
        assert_eq!(snapshot.entries_expired, 120);
    }

    #[test]
    fn test_observed_positive_rate() {
        let metrics = Metrics::new();

        for _ in 0..100 {
            metrics.record_lookup(false);
        }
        for _ in 0..10 {
            metrics.record_lookup(true);
        }

        let rate = metrics.observed_positive_rate();
        assert!((rate - 0.0909).abs() < 0.01); // 10/110
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();

        metrics.record_insert();
        metrics.record_lookup(true);
        metrics.record_export(3);

        metrics.reset();

        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_noop_metrics() {
        let metrics = NoOpMetrics;
        metrics.record_insert();
        metrics.record_lookup(true);
        metrics.record_export(1);
        metrics.record_import(1);
        metrics.record_expiry(1);
    }
}
