//! Ports Layer
//!
//! Defines the capabilities the layered filter requires from its host:
//! - Driven Ports (outbound) - entropy used to derive the hash key

pub mod outbound;

pub use outbound::EntropySource;
