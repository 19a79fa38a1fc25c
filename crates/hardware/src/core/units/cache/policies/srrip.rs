//! Static Re-Reference Interval Prediction (SRRIP) Replacement Policy.
//!
//! Each line carries a 2-bit re-reference prediction value (RRPV). Larger values
//! predict a more distant next reference and make the line a better victim.
//!
//! - Power-on: every line is `Distant`.
//! - Fill after a miss: `Intermediate` (one aging step away from eviction), so
//!   scanning blocks without reuse leave quickly.
//! - Hit: `Immediate`.
//! - Victim search: the first `Distant` way. If the set has none, every way ages
//!   one step and the scan repeats. Aging raises the maximum RRPV in the set, so
//!   the search ends after at most `MAX_RRPV` rounds.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `select_victim()`: O(W × MAX_RRPV) worst case
//! - **Space Complexity:** O(S × W) two-bit counters
//! - **Best Case:** Mixed workloads where scans would flush an LRU cache
//! - **Worst Case:** Recency-friendly working sets slightly larger than the cache

use super::EvictionPolicy;
use crate::common::constants::MAX_RRPV;

/// Re-reference prediction value of one cache line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Rrpv {
    /// Re-referenced soon (set on hit).
    Immediate = 0,
    /// Reached after one aging step from `Immediate`.
    Near = 1,
    /// Insertion prediction for filled lines.
    Intermediate = 2,
    /// Eviction candidate.
    #[default]
    Distant = MAX_RRPV,
}

impl Rrpv {
    /// Returns the prediction one aging step later, saturating at `Distant`.
    #[inline(always)]
    pub const fn aged(self) -> Self {
        match self {
            Self::Immediate => Self::Near,
            Self::Near => Self::Intermediate,
            Self::Intermediate | Self::Distant => Self::Distant,
        }
    }

    /// Returns the numeric RRPV.
    #[inline(always)]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Converts a numeric RRPV, rejecting values above `MAX_RRPV`.
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Immediate),
            1 => Some(Self::Near),
            2 => Some(Self::Intermediate),
            MAX_RRPV => Some(Self::Distant),
            _ => None,
        }
    }
}

/// SRRIP Policy state.
#[derive(Debug, Clone)]
pub struct SrripPolicy {
    /// Flattened `sets × ways` RRPV grid.
    rrpv: Vec<Rrpv>,
    /// Number of ways in the cache.
    ways: usize,
}

impl SrripPolicy {
    /// Creates a new SRRIP policy with every line `Distant`.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    ///
    /// # Panics
    ///
    /// Panics if `ways` is zero; victim selection could never terminate.
    pub fn new(sets: usize, ways: usize) -> Self {
        assert!(ways > 0, "SRRIP policy needs at least one way");
        Self {
            rrpv: vec![Rrpv::Distant; sets * ways],
            ways,
        }
    }

    /// Returns the RRPV of one line.
    #[inline(always)]
    pub fn rrpv(&self, set: usize, way: usize) -> Rrpv {
        self.row(set)[way]
    }

    /// Overwrites the RRPV of one line.
    pub fn set_rrpv(&mut self, set: usize, way: usize, value: Rrpv) {
        self.row_mut(set)[way] = value;
    }

    /// Returns the RRPVs of every way in `set`.
    pub fn row(&self, set: usize) -> &[Rrpv] {
        let base = set * self.ways;
        &self.rrpv[base..base + self.ways]
    }

    fn row_mut(&mut self, set: usize) -> &mut [Rrpv] {
        let base = set * self.ways;
        &mut self.rrpv[base..base + self.ways]
    }
}

impl EvictionPolicy for SrripPolicy {
    /// Returns the first `Distant` way, aging the set until one exists.
    fn select_victim(&mut self, set: usize) -> usize {
        let row = self.row_mut(set);
        loop {
            if let Some(way) = row.iter().position(|&r| r == Rrpv::Distant) {
                return way;
            }
            for r in row.iter_mut() {
                *r = r.aged();
            }
        }
    }

    fn update(&mut self, set: usize, way: usize, hit: bool) {
        self.row_mut(set)[way] = if hit {
            Rrpv::Immediate
        } else {
            Rrpv::Intermediate
        };
    }

    fn reset(&mut self) {
        self.rrpv.fill(Rrpv::Distant);
    }
}
