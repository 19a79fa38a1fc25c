//! Access Record Table (ART).
//!
//! A set-associative, sectored record of blocks the predictor chose to track.
//! A later lookup that finds a tracked block proves the block was reused.
//!
//! # Layout
//!
//! For a block number `b`:
//! - sector = `b % 4`
//! - set    = `(b / 4) % 512`
//! - pat    = `(b / 2048) % 512` (page-address tag)
//!
//! Each of the 16 ways of a set holds one `pat` and one validity bit per sector,
//! so up to four neighbouring blocks of a page share a single tag. Ways are
//! recycled in FIFO order. A cleared way holds page 0 with no valid sectors.
//!
//! # Sampling
//!
//! Sets whose index is a multiple of 4 are *sampled*: each of their sector
//! slots also remembers the PCRT bucket of the instruction that inserted it.
//! Hits in a sampled set credit that bucket with a reuse and consume the
//! sector; recycling a way of a sampled set charges every slot's bucket with a
//! non-reuse. Unsampled sets never train the PCRT, and a tracked sector there
//! keeps hitting until its way is recycled.

use tracing::debug;

use super::pcrt::Pcrt;
use crate::common::constants::{ART_SAMPLED_SETS, ART_SECTOR_BLOCKS, ART_SETS, ART_WAYS};
use crate::core::units::cache::policies::{EvictionPolicy, FifoPolicy};

/// PCRT buckets recorded for the sectors of one way in a sampled set.
type SectorBuckets = [u8; ART_SECTOR_BLOCKS];

/// Position of a block inside the ART.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtLocation {
    /// ART set index.
    pub set: usize,
    /// Sector within the page record.
    pub sector: usize,
    /// Page-address tag.
    pub pat: u16,
}

impl ArtLocation {
    /// Splits a block number into set, sector and page tag.
    pub const fn of(block: u64) -> Self {
        let sectors = ART_SECTOR_BLOCKS as u64;
        let sets = ART_SETS as u64;
        Self {
            set: ((block / sectors) % sets) as usize,
            sector: (block % sectors) as usize,
            pat: ((block / (sectors * sets)) % sets) as u16,
        }
    }

    /// Rebuilds the smallest block number with this location.
    pub const fn block(self) -> u64 {
        (self.pat as u64 * ART_SETS as u64 + self.set as u64) * ART_SECTOR_BLOCKS as u64
            + self.sector as u64
    }

    /// Returns `true` if the set carries PC attribution.
    #[inline(always)]
    pub const fn is_sampled(self) -> bool {
        is_sampled_set(self.set)
    }
}

#[inline(always)]
const fn is_sampled_set(set: usize) -> bool {
    set % ART_SECTOR_BLOCKS == 0
}

/// One page record of an ART set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtWay {
    /// Page-address tag; 0 after initialization.
    pat: u16,
    /// One validity bit per sector.
    valid: u8,
}

impl ArtWay {
    const fn single(pat: u16, sector: usize) -> Self {
        Self {
            pat,
            valid: 1 << sector,
        }
    }

    /// Page tag held by the way.
    pub const fn pat(self) -> u16 {
        self.pat
    }

    /// Returns `true` if `sector` is currently tracked.
    #[inline(always)]
    pub const fn is_valid(self, sector: usize) -> bool {
        self.valid & (1 << sector) != 0
    }

    /// Number of tracked sectors.
    pub const fn tracked(self) -> u32 {
        self.valid.count_ones()
    }

    const fn holds(self, pat: u16) -> bool {
        self.pat == pat
    }
}

/// Result of [`AccessRecordTable::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtInsert {
    /// The page already had a record; the sector was added to it.
    Merged {
        /// Way holding the page.
        way: usize,
    },
    /// The FIFO victim way was overwritten with a new page record.
    Replaced {
        /// Way that now holds the page.
        way: usize,
        /// Page tag that was displaced.
        evicted: u16,
    },
}

impl ArtInsert {
    /// Way that received the block.
    pub const fn way(self) -> usize {
        match self {
            Self::Merged { way } | Self::Replaced { way, .. } => way,
        }
    }
}

/// Sectored access history with sampled PC attribution.
#[derive(Debug, Clone)]
pub struct AccessRecordTable {
    sets: Vec<[ArtWay; ART_WAYS]>,
    fifo: FifoPolicy,
    sampled: Vec<[SectorBuckets; ART_WAYS]>,
    lookups: u64,
}

impl Default for AccessRecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessRecordTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            sets: vec![[ArtWay::default(); ART_WAYS]; ART_SETS],
            fifo: FifoPolicy::new(ART_SETS, ART_WAYS),
            sampled: vec![[[0; ART_SECTOR_BLOCKS]; ART_WAYS]; ART_SAMPLED_SETS],
            lookups: 0,
        }
    }

    /// Clears every record, attribution slot, FIFO cursor and the lookup counter.
    pub fn reset(&mut self) {
        self.sets.fill([ArtWay::default(); ART_WAYS]);
        self.sampled.fill([[0; ART_SECTOR_BLOCKS]; ART_WAYS]);
        self.fifo.reset();
        self.lookups = 0;
    }

    /// Number of [`find`](Self::find) calls since the last reset.
    pub const fn lookups(&self) -> u64 {
        self.lookups
    }

    /// Returns one way of a set.
    pub fn way(&self, set: usize, way: usize) -> ArtWay {
        self.sets[set][way]
    }

    /// Returns the way the next non-merging insertion into `set` will overwrite.
    pub fn cursor(&self, set: usize) -> usize {
        self.fifo.cursor(set)
    }

    /// PCRT bucket recorded for a sector slot, or `None` for unsampled sets.
    pub fn sampled_bucket(&self, set: usize, way: usize, sector: usize) -> Option<u8> {
        is_sampled_set(set).then(|| self.sampled[set / ART_SECTOR_BLOCKS][way][sector])
    }

    fn buckets_mut(&mut self, set: usize) -> Option<&mut [SectorBuckets; ART_WAYS]> {
        if is_sampled_set(set) {
            Some(&mut self.sampled[set / ART_SECTOR_BLOCKS])
        } else {
            None
        }
    }

    /// Looks up a block.
    ///
    /// In sampled sets a hit credits the inserting PC's bucket and clears the
    /// sector's validity bit, so each insertion trains at most one reuse.
    /// Every call advances the lookup counter.
    ///
    /// # Returns
    ///
    /// `true` if the block was tracked.
    pub fn find(&mut self, pcrt: &mut Pcrt, block: u64) -> bool {
        self.lookups += 1;
        let loc = ArtLocation::of(block);

        let Some(way) = self.sets[loc.set]
            .iter()
            .position(|w| w.holds(loc.pat) && w.is_valid(loc.sector))
        else {
            return false;
        };

        if let Some(bucket) = self.sampled_bucket(loc.set, way, loc.sector) {
            pcrt.record_reuse(bucket);
            self.sets[loc.set][way].valid &= !(1 << loc.sector);
        }
        true
    }

    /// Starts tracking a block on behalf of the instruction at `pc`.
    ///
    /// If the block's page already has a record, the sector joins it. Otherwise
    /// the set's FIFO victim is overwritten; in sampled sets the buckets stored
    /// in all of the victim's sector slots are first charged with a non-reuse.
    pub fn insert(&mut self, pcrt: &mut Pcrt, pc: u64, block: u64) -> ArtInsert {
        let loc = ArtLocation::of(block);
        let bucket = pcrt.index(pc);

        if let Some(way) = self.sets[loc.set].iter().position(|w| w.holds(loc.pat)) {
            self.sets[loc.set][way].valid |= 1 << loc.sector;
            if let Some(buckets) = self.buckets_mut(loc.set) {
                buckets[way][loc.sector] = bucket;
            }
            return ArtInsert::Merged { way };
        }

        let way = self.fifo.select_victim(loc.set);
        let evicted = self.sets[loc.set][way].pat;

        if let Some(buckets) = self.buckets_mut(loc.set) {
            for &charged in &buckets[way] {
                pcrt.record_miss(charged);
            }
            debug!(
                set = loc.set,
                way,
                evicted,
                charged = ?buckets[way],
                "ART page evicted from sampled set"
            );
            buckets[way][loc.sector] = bucket;
        }

        self.sets[loc.set][way] = ArtWay::single(loc.pat, loc.sector);
        self.fifo.update(loc.set, way, false);
        ArtInsert::Replaced { way, evicted }
    }
}
