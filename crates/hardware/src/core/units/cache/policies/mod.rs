//! Cache Eviction Policies.
//!
//! Implements the victim selection algorithms used by the LLC and by the
//! Access Record Table of the bypass predictor.
//!
//! # Policies
//!
//! - `Srrip`: Static Re-Reference Interval Prediction (LLC victims).
//! - `Fifo`: First-In, First-Out ring buffer (ART ways).

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Static re-reference interval prediction policy.
pub mod srrip;

pub use fifo::FifoPolicy;
pub use srrip::{Rrpv, SrripPolicy};

/// Trait for set-associative eviction policies.
///
/// Defines the interface for picking victims and folding access outcomes back
/// into per-way state.
pub trait EvictionPolicy {
    /// Selects a victim line to evict from a specific set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn select_victim(&mut self, set: usize) -> usize;

    /// Updates the policy state after a line was accessed or filled.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way that was hit or filled.
    /// * `hit` - `true` for a hit, `false` for a fill after a miss.
    fn update(&mut self, set: usize, way: usize, hit: bool);

    /// Returns every set to its power-on state.
    fn reset(&mut self);
}
