//! LLC Access Types.
//!
//! This module defines the classification of requests reaching the last-level cache.
//! These types are used for the following:
//! 1. **Bypass Gating:** Only demand and prefetch fills are eligible for bypass.
//! 2. **Replacement Updates:** Write-backs never touch re-reference state.
//! 3. **Statistics Tracking:** Categorizing requests for per-type counts.

use std::fmt;

use super::error::ProtocolError;

/// Type of request presented to the LLC by the host simulator.
///
/// The raw encoding (`0..=3`) matches the host simulator's access-type codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Demand load miss from an upper level.
    Load,

    /// Read-for-ownership issued ahead of a store.
    Rfo,

    /// Prefetch request from an upper-level prefetcher.
    Prefetch,

    /// Dirty eviction from an upper level.
    ///
    /// Write-backs carry no instruction attribution and must always be stored.
    Writeback,
}

impl AccessType {
    /// All access types in raw-code order.
    pub const ALL: [Self; 4] = [Self::Load, Self::Rfo, Self::Prefetch, Self::Writeback];

    /// Decodes a raw host access-type code.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownAccessType`] for any code outside `0..=3`.
    pub const fn from_raw(raw: u32) -> Result<Self, ProtocolError> {
        match raw {
            0 => Ok(Self::Load),
            1 => Ok(Self::Rfo),
            2 => Ok(Self::Prefetch),
            3 => Ok(Self::Writeback),
            other => Err(ProtocolError::UnknownAccessType(other)),
        }
    }

    /// Returns the raw host access-type code.
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::Load => 0,
            Self::Rfo => 1,
            Self::Prefetch => 2,
            Self::Writeback => 3,
        }
    }

    /// Returns `true` for write-back requests.
    #[inline(always)]
    pub const fn is_writeback(self) -> bool {
        matches!(self, Self::Writeback)
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "LOAD",
            Self::Rfo => "RFO",
            Self::Prefetch => "PF",
            Self::Writeback => "WB",
        };
        f.write_str(name)
    }
}
