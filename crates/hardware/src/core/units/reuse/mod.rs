//! Reuse-Detector Bypass Predictor.
//!
//! Decides whether a block arriving at the LLC is worth storing. The predictor
//! combines two structures:
//! 1. **ART:** records blocks it chose to track; finding one again proves reuse.
//! 2. **PCRT:** per-instruction counts of tracked blocks that were, or were not,
//!    reused before the ART forgot them.
//!
//! A request whose block is found in the ART is always admitted. Otherwise the
//! PCRT bucket of the requesting instruction is consulted: instructions with
//! fewer than one reuse per `bypass_ratio` dead blocks are bypassed. Blocks from
//! instructions in a moderate band are tracked so their evidence stays fresh,
//! and every `exploration_period`-th lookup is tracked unconditionally so no
//! instruction is starved of new evidence.

/// Access Record Table with sampled PC attribution.
pub mod art;

/// PC Reuse Table.
pub mod pcrt;

use tracing::trace;

pub use art::{AccessRecordTable, ArtInsert, ArtLocation, ArtWay};
pub use pcrt::{Pcrt, PcrtEntry};

use crate::common::AccessType;
use crate::config::PredictorConfig;
use crate::stats::PredictorStats;

/// Outcome of a bypass prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Store the block; the eviction policy picks a victim.
    Admit,
    /// Do not store the block.
    Bypass,
}

impl Decision {
    /// Returns `true` for [`Decision::Bypass`].
    pub const fn is_bypass(self) -> bool {
        matches!(self, Self::Bypass)
    }
}

/// Reuse-detector bypass predictor state for one cache instance.
#[derive(Debug, Clone)]
pub struct ReuseDetector {
    art: AccessRecordTable,
    pcrt: Pcrt,
    config: PredictorConfig,
    stats: PredictorStats,
}

impl ReuseDetector {
    /// Creates a predictor in the initialized state.
    pub fn new(config: &PredictorConfig) -> Self {
        Self {
            art: AccessRecordTable::new(),
            pcrt: Pcrt::new(config.word_offset),
            config: *config,
            stats: PredictorStats::default(),
        }
    }

    /// Clears the ART and attribution table, restores the PCRT prior and zeroes
    /// the lookup counter and statistics.
    pub fn initialize(&mut self) {
        self.art.reset();
        self.pcrt.reset();
        self.stats = PredictorStats::default();
    }

    /// Predicts whether the block at `address` requested by `pc` should bypass the cache.
    ///
    /// Write-backs are always admitted without touching predictor state. For other
    /// requests the ART is searched; on a miss the insertion and bypass rules are
    /// both evaluated against the PCRT counters as they stood before any insertion.
    pub fn decide(&mut self, address: u64, pc: u64, access: AccessType) -> Decision {
        if access.is_writeback() {
            return Decision::Admit;
        }

        let block = address >> self.config.block_offset;
        self.stats.art_lookups += 1;
        if self.art.find(&mut self.pcrt, block) {
            self.stats.art_hits += 1;
            trace!(block, pc, %access, "ART hit, admit");
            return Decision::Admit;
        }

        let bucket = self.pcrt.index(pc);
        let entry = self.pcrt.entry(bucket);
        let predicts_dead = entry.reuse_below(self.config.bypass_ratio);
        let in_band = entry.reuse_above(self.config.track_ratio) && predicts_dead;
        let exploring = self.art.lookups() % self.config.exploration_period == 0;

        if in_band || exploring {
            self.stats.art_insertions += 1;
            let outcome = self.art.insert(&mut self.pcrt, pc, block);
            if matches!(outcome, ArtInsert::Replaced { .. }) {
                self.stats.art_evictions += 1;
            }
        }

        let decision = if predicts_dead {
            self.stats.bypasses += 1;
            Decision::Bypass
        } else {
            Decision::Admit
        };
        trace!(
            block,
            bucket,
            reused = entry.reused,
            not_reused = entry.not_reused,
            tracked = in_band || exploring,
            ?decision,
            "ART miss"
        );
        decision
    }

    /// Access Record Table.
    pub const fn art(&self) -> &AccessRecordTable {
        &self.art
    }

    /// PC Reuse Table.
    pub const fn pcrt(&self) -> &Pcrt {
        &self.pcrt
    }

    /// Mutable PC Reuse Table, for warm-starting or inspecting training.
    pub const fn pcrt_mut(&mut self) -> &mut Pcrt {
        &mut self.pcrt
    }

    /// Mutable ART together with the PCRT it trains.
    pub const fn tables_mut(&mut self) -> (&mut AccessRecordTable, &mut Pcrt) {
        (&mut self.art, &mut self.pcrt)
    }

    /// Predictor counters since the last [`initialize`](Self::initialize).
    pub const fn stats(&self) -> &PredictorStats {
        &self.stats
    }

    /// Active tuning.
    pub const fn config(&self) -> &PredictorConfig {
        &self.config
    }
}
