//! PC Reuse Table (PCRT).
//!
//! A direct-mapped table of saturating `reused` / `not_reused` counter pairs indexed
//! by a hashed instruction address. The ratio between the two counters of a bucket
//! decides whether blocks fetched by that instruction are worth storing.
//!
//! Counters are 10 bits wide. An increment that would push either counter past
//! [`PCRT_COUNTER_MAX`] first halves both counters of the bucket, which keeps the
//! ratio while decaying old evidence.
//!
//! PCs that alias to the same bucket share counters; no collision handling is done.

use tracing::debug;

use crate::common::constants::{PCRT_COUNTER_MAX, PCRT_INITIAL_REUSED, PCRT_SIZE};

/// Counter pair for one PCRT bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcrtEntry {
    /// Tracked blocks from this bucket that were referenced again before leaving the ART.
    pub reused: u16,
    /// Tracked blocks from this bucket that left the ART unreferenced.
    pub not_reused: u16,
}

impl PcrtEntry {
    /// Cold-start state of every bucket.
    pub const INITIAL: Self = Self {
        reused: PCRT_INITIAL_REUSED,
        not_reused: 0,
    };

    /// Returns `true` when `reused * ratio < not_reused`.
    #[inline(always)]
    pub const fn reuse_below(self, ratio: u32) -> bool {
        (self.reused as u64) * (ratio as u64) < self.not_reused as u64
    }

    /// Returns `true` when `reused * ratio > not_reused`.
    #[inline(always)]
    pub const fn reuse_above(self, ratio: u32) -> bool {
        (self.reused as u64) * (ratio as u64) > self.not_reused as u64
    }

    const fn halve(&mut self) {
        self.reused /= 2;
        self.not_reused /= 2;
    }
}

impl Default for PcrtEntry {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// PC Reuse Table.
#[derive(Debug, Clone)]
pub struct Pcrt {
    entries: Vec<PcrtEntry>,
    word_offset: u32,
}

impl Pcrt {
    /// Creates a table in the cold-start state.
    ///
    /// # Arguments
    ///
    /// * `word_offset` - Number of low PC bits dropped before bucketing.
    pub fn new(word_offset: u32) -> Self {
        Self {
            entries: vec![PcrtEntry::INITIAL; PCRT_SIZE],
            word_offset,
        }
    }

    /// Restores every bucket to [`PcrtEntry::INITIAL`].
    pub fn reset(&mut self) {
        self.entries.fill(PcrtEntry::INITIAL);
    }

    /// Hashes a program counter into a bucket index.
    #[inline(always)]
    pub const fn index(&self, pc: u64) -> u8 {
        ((pc >> self.word_offset) % PCRT_SIZE as u64) as u8
    }

    /// Returns the counters of a bucket.
    #[inline(always)]
    pub fn entry(&self, bucket: u8) -> PcrtEntry {
        self.entries[bucket as usize]
    }

    /// Returns the counters of the bucket `pc` hashes to.
    pub fn lookup(&self, pc: u64) -> PcrtEntry {
        self.entry(self.index(pc))
    }

    /// Overwrites the counters of a bucket.
    ///
    /// Values are clamped to the 10-bit counter range.
    pub fn set_entry(&mut self, bucket: u8, entry: PcrtEntry) {
        self.entries[bucket as usize] = PcrtEntry {
            reused: entry.reused.min(PCRT_COUNTER_MAX),
            not_reused: entry.not_reused.min(PCRT_COUNTER_MAX),
        };
    }

    /// Credits a reuse to `bucket`.
    pub fn record_reuse(&mut self, bucket: u8) {
        let entry = &mut self.entries[bucket as usize];
        if entry.reused >= PCRT_COUNTER_MAX {
            entry.halve();
            debug!(bucket, ?entry, "PCRT reuse counter saturated, halved bucket");
        }
        entry.reused += 1;
    }

    /// Charges a dead eviction to `bucket`.
    pub fn record_miss(&mut self, bucket: u8) {
        let entry = &mut self.entries[bucket as usize];
        if entry.not_reused >= PCRT_COUNTER_MAX {
            entry.halve();
            debug!(bucket, ?entry, "PCRT non-reuse counter saturated, halved bucket");
        }
        entry.not_reused += 1;
    }

    /// Iterates over all buckets in index order.
    pub fn iter(&self) -> impl Iterator<Item = &PcrtEntry> {
        self.entries.iter()
    }
}
