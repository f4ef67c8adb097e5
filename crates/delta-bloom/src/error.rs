//! Error types for the layered delta filter

use thiserror::Error;

/// Errors that can occur when constructing or merging a layered filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid load factor: {load_factor} (must be in (0.0, 1.0])")]
    InvalidLoadFactor { load_factor: f64 },

    #[error("Requested filter too large: 2^{size_exponent} bits > 2^{max}")]
    FilterTooLarge { size_exponent: u32, max: u32 },

    #[error("Requested filter too small: 2^{size_exponent} bits < 2^{min}")]
    FilterTooSmall { size_exponent: u32, min: u32 },

    #[error("Capacity overflow: 2^{size_exponent} * {load_factor} does not fit a native integer")]
    CapacityOverflow { size_exponent: u32, load_factor: f64 },

    #[error("Randomness unavailable: {0}")]
    RandomnessUnavailable(#[from] EntropyError),

    #[error("Invalid layer size: {actual} bytes (expected {expected})")]
    LayerSizeMismatch { expected: usize, actual: usize },
}

/// Failure reported by an entropy source
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EntropyError(pub String);

impl From<rand::Error> for EntropyError {
    fn from(err: rand::Error) -> Self {
        Self(err.to_string())
    }
}
