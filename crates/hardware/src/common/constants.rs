//! Reuse-Detector Geometry Constants.
//!
//! This module defines the fixed table geometry of the bypass predictor. It includes:
//! 1. **ART Constants:** Set count, associativity and sectoring of the Access Record Table.
//! 2. **Sampling Constants:** Shape of the PC attribution table kept for sampled sets.
//! 3. **PCRT Constants:** Bucket count and counter bound of the PC Reuse Table.
//! 4. **SRRIP Constants:** Width of the re-reference prediction value.

/// Number of sets in the Access Record Table.
pub const ART_SETS: usize = 512;

/// Associativity of each ART set.
pub const ART_WAYS: usize = 16;

/// Number of consecutive blocks sharing one page tag within an ART way.
pub const ART_SECTOR_BLOCKS: usize = 4;

/// Number of ART sets that carry PC attribution (one per sector group).
pub const ART_SAMPLED_SETS: usize = ART_SETS / ART_SECTOR_BLOCKS;

/// Width in bits of a PC bucket index stored in a sampled slot.
pub const PCRT_INDEX_BITS: u32 = 8;

/// Number of buckets in the PC Reuse Table.
pub const PCRT_SIZE: usize = 1 << PCRT_INDEX_BITS;

/// Largest value either PCRT counter may hold (10-bit counters).
pub const PCRT_COUNTER_MAX: u16 = 1023;

/// Initial `reused` count of every PCRT bucket.
///
/// Gives a mild reuse-friendly prior so cold PCs are not bypassed outright.
pub const PCRT_INITIAL_REUSED: u16 = 3;

/// Maximum re-reference prediction value (2-bit RRPV).
pub const MAX_RRPV: u8 = 3;
