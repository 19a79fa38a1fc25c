//! LLC replacement engine.
//!
//! This module contains the functional units invoked by a host cache simulator
//! on every last-level-cache fill decision: the reuse-detector bypass predictor
//! and the eviction policies it hands admitted blocks to.

/// Functional units (LLC replacement hooks, eviction policies, bypass predictor).
pub mod units;

pub use self::units::cache::LlcReplacement;
