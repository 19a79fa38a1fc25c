//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest line in a set, regardless of how recently
//! it was accessed. It operates as a circular buffer (Round-Robin) for each set:
//! every fill at the cursor advances it to the next way, and hits never move it.
//!
//! The Access Record Table uses this policy to choose which page record to
//! overwrite, so the order in which ART ways are recycled is `0, 1, .., W-1, 0, ..`
//! independent of the access pattern.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(1)
//!   - `select_victim()`: O(1)
//! - **Space Complexity:** O(S) where S is the number of sets
//! - **Hardware Cost:** Minimal - single counter per set
//! - **Best Case:** Record tables where every entry ages at the same rate
//! - **Worst Case:** Hot entries inserted early, recycled regardless of use

use super::EvictionPolicy;

/// FIFO Policy state.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Tracks the next way to be evicted for each set.
    next_way: Vec<usize>,
    /// Number of ways in the cache.
    ways: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    ///
    /// # Panics
    ///
    /// Panics if `ways` is zero.
    pub fn new(sets: usize, ways: usize) -> Self {
        assert!(ways > 0, "FIFO policy needs at least one way");
        Self {
            next_way: vec![0; sets],
            ways,
        }
    }

    /// Returns the way the next fill of `set` will overwrite.
    #[inline(always)]
    pub fn cursor(&self, set: usize) -> usize {
        self.next_way[set]
    }
}

impl EvictionPolicy for FifoPolicy {
    /// Identifies the victim way to evict.
    ///
    /// Returns the current round-robin pointer for the specified set.
    fn select_victim(&mut self, set: usize) -> usize {
        self.next_way[set]
    }

    /// Advances the pointer when the fill landed on it.
    fn update(&mut self, set: usize, way: usize, hit: bool) {
        if !hit && self.next_way[set] == way {
            self.next_way[set] = (way + 1) % self.ways;
        }
    }

    fn reset(&mut self) {
        self.next_way.fill(0);
    }
}
