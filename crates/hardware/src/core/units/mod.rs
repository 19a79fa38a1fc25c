//! Functional units of the replacement engine.
//!
//! This module contains the LLC replacement hooks together with the eviction
//! policies, and the reuse-detector bypass predictor with its ART and PCRT tables.

/// LLC replacement hooks with eviction policies (SRRIP, FIFO).
pub mod cache;

/// Reuse-detector bypass predictor (ART, PCRT).
pub mod reuse;
