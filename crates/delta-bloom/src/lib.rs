//! # Delta Bloom
//!
//! Layered Bloom filter tuned for the size of its wire representation.
//!
//! A classic Bloom filter minimizes bits per element in memory. This filter
//! also minimizes the compressed size of the incremental updates ("deltas")
//! peers exchange to keep remote copies in sync: one keyed hash function
//! per value keeps every layer sparse, and each exported layer carries only
//! the entries added since the previous export.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `LayeredFilter`: Layer stack with insert/test, delta export, merge, expiry
//!   - Bit layers: Fixed-size bit array per epoch (crate-internal)
//!   - `SipKeyedHasher`: Keyed hash selecting one bit position per value
//!   - `FilterConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `EntropySource`: Driven port supplying hash key material
//!
//! - **Adapters Layer** (`adapters/`): Concrete entropy sources
//!   - `OsEntropy`, `RngEntropy`
//!
//! - **Service Layer** (`service/`): Thread-safe handle
//!   - `SharedFilter`: Mutex-guarded filter for multi-threaded owners
//!
//! ## Wire Format
//!
//! A delta is the raw bytes of one layer, exactly `2^size_exponent / 8`
//! bytes with no header. Bit `p` lives at byte `p / 8`, bit `p & 7`. Peers
//! agree on the size exponent (and, for merges to be meaningful, on the
//! hash key) out of band.
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: No false negatives while the layer holding a value is retained
//! - **INVARIANT-2**: Only the head layer is ever mutated by insertion
//! - **INVARIANT-3**: Expiry drops at most one (the oldest) layer per export/import
//!
//! ## Usage Example
//!
//! ```
//! use delta_bloom::{LayeredFilter, OsEntropy};
//!
//! // 2^15-bit layers, 32 bits per entry
//! let mut filter = LayeredFilter::new(OsEntropy, 15, 0.03125)?;
//! assert_eq!(filter.max_entries(), 1024);
//!
//! assert!(!filter.test_and_set(b"peer-id-1"));
//! assert!(filter.test(b"peer-id-1"));
//!
//! // Ship only what was added since the last export
//! let delta = filter.export_delta();
//! assert_eq!(delta.len(), 4096);
//! # Ok::<(), delta_bloom::FilterError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{OsEntropy, RngEntropy};
pub use domain::{FilterConfig, FilterConfigBuilder, FilterKey, LayeredFilter};
pub use error::{EntropyError, FilterError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::EntropySource;
pub use service::SharedFilter;
