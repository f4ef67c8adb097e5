//! Service Layer
//!
//! Thread-safe handle over the domain filter for owners shared across
//! threads.

pub mod shared_filter;

pub use shared_filter::SharedFilter;
