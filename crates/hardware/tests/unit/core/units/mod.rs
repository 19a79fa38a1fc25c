//! Functional unit tests.

/// LLC hooks and eviction policies.
pub mod cache;
