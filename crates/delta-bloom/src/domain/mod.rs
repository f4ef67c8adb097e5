//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Bit layers (one epoch of entries each)
//! - The keyed hash function
//! - Sizing and false positive math
//! - Configuration
//! - The layered filter itself
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No internal locking

pub(crate) mod bit_layer;
pub mod config;
pub mod hash_functions;
pub mod layered_filter;
pub mod parameters;

pub use config::{FilterConfig, FilterConfigBuilder};
pub use hash_functions::{FilterKey, KeyedHash, SipKeyedHasher};
pub use layered_filter::LayeredFilter;
pub use parameters::{calculate_capacity, expected_fpr, max_size_exponent, MIN_SIZE_EXPONENT};
