//! Adapters Layer
//!
//! Concrete entropy sources:
//! - `OsEntropy`: operating system CSPRNG
//! - `RngEntropy`: any `rand` generator (seeded sources for tests, or for
//!   peers that must derive the same key)

pub mod entropy;

pub use entropy::{OsEntropy, RngEntropy};
