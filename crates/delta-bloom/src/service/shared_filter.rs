//! Shared Filter
//!
//! `LayeredFilter` is single-owner and does no locking of its own. This
//! handle wraps it in one mutex so every operation, including the whole
//! read-modify-write of `test_and_set`, runs under a single lock
//! acquisition.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::domain::{FilterConfig, LayeredFilter};
use crate::error::FilterError;
use crate::ports::EntropySource;

/// Cloneable, thread-safe handle to a layered filter
#[derive(Clone, Debug)]
pub struct SharedFilter {
    inner: Arc<Mutex<LayeredFilter>>,
}

impl SharedFilter {
    /// Wrap an existing filter
    pub fn new(filter: LayeredFilter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(filter)),
        }
    }

    /// Build a filter from `config` and wrap it
    pub fn from_config<E: EntropySource>(
        entropy: E,
        config: FilterConfig,
    ) -> Result<Self, FilterError> {
        LayeredFilter::from_config(entropy, config).map(Self::new)
    }

    pub fn max_entries(&self) -> usize {
        self.inner.lock().max_entries()
    }

    pub fn entries(&self) -> usize {
        self.inner.lock().entries()
    }

    pub fn layer_count(&self) -> usize {
        self.inner.lock().layer_count()
    }

    pub fn test(&self, value: &[u8]) -> bool {
        self.inner.lock().test(value)
    }

    pub fn test_and_set(&self, value: &[u8]) -> bool {
        self.inner.lock().test_and_set(value)
    }

    pub fn export_delta(&self) -> Vec<u8> {
        self.inner.lock().export_delta()
    }

    pub fn import_layer(&self, bytes: &[u8]) -> Result<(), FilterError> {
        self.inner.lock().import_layer(bytes)
    }

    /// Run `f` with exclusive access to the filter
    pub fn with_filter<T>(&self, f: impl FnOnce(&mut LayeredFilter) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}
