//! Reuse-detector LLC replacement library.
//!
//! This crate implements the admission and replacement decisions of a simulated
//! last-level cache with the following:
//! 1. **Bypass prediction:** A sectored, sampled Access Record Table (ART) detects
//!    reuse and trains a per-instruction PC Reuse Table (PCRT) that predicts which
//!    fills are dead on arrival.
//! 2. **Eviction:** Static re-reference interval prediction (SRRIP) picks victims
//!    for admitted blocks.
//! 3. **Hooks:** `initialize`, `decide_and_select`, `update` and `finalize_stats`
//!    for a trace-driven host simulator.
//! 4. **Configuration and statistics:** JSON-deserializable tuning and serializable counters.
//!
//! # Examples
//!
//! ```
//! use reuse_llc::{AccessType, LlcReplacement, ReplacementConfig};
//!
//! let mut llc = LlcReplacement::new(&ReplacementConfig::default());
//! let way = llc.decide_and_select(0, 0, 7, &[], 0x40_1000, 0x1234_5640, AccessType::Load);
//! assert!(way < llc.bypass_way());
//! llc.update(0, 7, way, 0x1234_5640, 0x40_1000, 0, AccessType::Load, false);
//! assert_eq!(llc.finalize_stats().misses, 1);
//! ```

/// Common types and constants (table geometry, access types, errors).
pub mod common;
/// Engine configuration (defaults, LLC geometry, predictor tuning).
pub mod config;
/// Replacement engine (LLC hooks, eviction policies, bypass predictor).
pub mod core;
/// Replacement statistics collection.
pub mod stats;

/// Request type consumed from the host simulator.
pub use crate::common::AccessType;
/// Root configuration type; use `ReplacementConfig::default()` or deserialize from JSON.
pub use crate::config::ReplacementConfig;
/// LLC replacement hooks; construct with `LlcReplacement::new`.
pub use crate::core::LlcReplacement;
/// Bypass predictor and its decision type.
pub use crate::core::units::reuse::{Decision, ReuseDetector};
/// Statistics snapshot returned by `finalize_stats`.
pub use crate::stats::ReplacementStats;
