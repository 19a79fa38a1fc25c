//! Replacement statistics collection.
//!
//! This module tracks what the replacement engine decided. It provides:
//! 1. **Request mix:** Counts by access type (load, RFO, prefetch, write-back).
//! 2. **Predictor activity:** ART hits, insertions, page evictions and bypasses.
//! 3. **Cache outcome:** Hit/miss counts reported back through `update`.
//!
//! Formatting and printing are left to the host harness; the structures serialize
//! with `serde` so they can be emitted as JSON alongside simulator output.

use serde::Serialize;

use crate::common::AccessType;

/// Counters maintained by the reuse-detector bypass predictor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PredictorStats {
    /// ART lookups performed (one per non-write-back decision).
    pub art_lookups: u64,
    /// Lookups that found a tracked sector.
    pub art_hits: u64,
    /// Blocks recorded in the ART.
    pub art_insertions: u64,
    /// Insertions that displaced the page held by the FIFO victim way.
    pub art_evictions: u64,
    /// Requests predicted dead and not stored.
    pub bypasses: u64,
}

impl PredictorStats {
    /// Fraction of ART lookups that hit, or `0.0` before any lookup.
    pub fn art_hit_rate(&self) -> f64 {
        ratio(self.art_hits, self.art_lookups)
    }
}

/// Statistics for one LLC replacement instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplacementStats {
    /// Requests presented to `decide_and_select`.
    pub accesses: u64,
    /// Demand load requests.
    pub loads: u64,
    /// Read-for-ownership requests.
    pub rfos: u64,
    /// Prefetch requests.
    pub prefetches: u64,
    /// Write-back requests.
    pub writebacks: u64,
    /// Requests that reached the eviction policy.
    pub victim_selections: u64,
    /// `update` calls reporting a hit.
    pub hits: u64,
    /// `update` calls reporting a miss.
    pub misses: u64,
    /// Bypass predictor counters.
    pub predictor: PredictorStats,
}

impl ReplacementStats {
    /// Counts one request of the given type.
    pub const fn record_access(&mut self, access: AccessType) {
        self.accesses += 1;
        match access {
            AccessType::Load => self.loads += 1,
            AccessType::Rfo => self.rfos += 1,
            AccessType::Prefetch => self.prefetches += 1,
            AccessType::Writeback => self.writebacks += 1,
        }
    }

    /// Fraction of requests that were bypassed.
    pub fn bypass_rate(&self) -> f64 {
        ratio(self.predictor.bypasses, self.accesses)
    }

    /// Fraction of reported outcomes that were hits.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.hits + self.misses)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
