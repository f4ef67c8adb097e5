//! Layered filter configuration and validation
//!
//! Peers exchanging deltas must agree on the size exponent out of band;
//! `FilterConfig` is serializable so that agreement can travel as JSON.
//!
//! # Example
//!
//! ```
//! use delta_bloom::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .size_exponent(15)
//!     .load_factor(0.03125)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.capacity().ok(), Some(1024));
//! ```

use crate::domain::parameters::{
    calculate_capacity, layer_bytes, max_size_exponent, MIN_SIZE_EXPONENT,
};
use crate::error::FilterError;
use serde::{Deserialize, Serialize};

/// Layered filter configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Layer size is `2^size_exponent` bits
    pub size_exponent: u32,
    /// Ratio of capacity to layer bits, in (0.0, 1.0]
    pub load_factor: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            size_exponent: 20,    // 128 KiB per layer
            load_factor: 0.03125, // 32 bits per entry
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(size_exponent: u32, load_factor: f64) -> Result<Self, FilterError> {
        let config = Self {
            size_exponent,
            load_factor,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate load factor, size bounds and capacity range
    pub fn validate(&self) -> Result<(), FilterError> {
        // NaN fails both comparisons, so test for the accepted range
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(FilterError::InvalidLoadFactor {
                load_factor: self.load_factor,
            });
        }

        if self.size_exponent > max_size_exponent() {
            return Err(FilterError::FilterTooLarge {
                size_exponent: self.size_exponent,
                max: max_size_exponent(),
            });
        }

        if self.size_exponent < MIN_SIZE_EXPONENT {
            return Err(FilterError::FilterTooSmall {
                size_exponent: self.size_exponent,
                min: MIN_SIZE_EXPONENT,
            });
        }

        self.capacity().map(|_| ())
    }

    /// Maximum entries: `floor(2^size_exponent * load_factor)`
    pub fn capacity(&self) -> Result<usize, FilterError> {
        calculate_capacity(self.size_exponent, self.load_factor).ok_or(
            FilterError::CapacityOverflow {
                size_exponent: self.size_exponent,
                load_factor: self.load_factor,
            },
        )
    }

    /// Exact byte length of one layer on the wire
    pub fn layer_bytes(&self) -> usize {
        layer_bytes(self.size_exponent)
    }

    /// Builder-style method to set the size exponent
    pub fn with_size_exponent(mut self, size_exponent: u32) -> Self {
        self.size_exponent = size_exponent;
        self
    }

    /// Builder-style method to set the load factor
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    size_exponent: Option<u32>,
    load_factor: Option<f64>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layer size exponent (layer = 2^exp bits)
    pub fn size_exponent(mut self, size_exponent: u32) -> Self {
        self.size_exponent = Some(size_exponent);
        self
    }

    /// Set the load factor (must be in (0.0, 1.0])
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = Some(load_factor);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> FilterConfig {
        let defaults = FilterConfig::default();

        FilterConfig {
            size_exponent: self.size_exponent.unwrap_or(defaults.size_exponent),
            load_factor: self.load_factor.unwrap_or(defaults.load_factor),
        }
    }
}
