//! Protocol and Configuration Errors.
//!
//! This module defines the error types of the replacement engine. It provides:
//! 1. **Protocol Errors:** Calling-contract violations by the host simulator.
//! 2. **Configuration Errors:** Invalid geometry or predictor parameters.
//!
//! Protocol errors are fatal inside the lifecycle hooks; they are exposed as values
//! so harness adapters can decode raw inputs with `?` before calling in.

use thiserror::Error;

/// Violation of the calling protocol between the host simulator and the LLC policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Raw access-type code outside `LOAD`, `RFO`, `PREFETCH`, `WRITEBACK`.
    #[error("unknown LLC access type code {0}")]
    UnknownAccessType(u32),

    /// A write-back arrived with an originating instruction address.
    #[error("write-back carries instruction address {pc:#x}; write-backs have no PC attribution")]
    AttributedWriteback {
        /// The offending program counter.
        pc: u64,
    },
}

/// Rejected replacement configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("malformed replacement config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The LLC must have at least one set and one way.
    #[error("LLC geometry must be non-zero (sets = {sets}, ways = {ways})")]
    EmptyGeometry {
        /// Configured set count.
        sets: usize,
        /// Configured associativity.
        ways: usize,
    },

    /// An address shift would discard the whole 64-bit address.
    #[error("{name} must be below 64, got {value}")]
    OffsetOutOfRange {
        /// Name of the offending field.
        name: &'static str,
        /// Configured shift amount.
        value: u32,
    },

    /// A predictor ratio or period was zero.
    #[error("{name} must be non-zero")]
    ZeroParameter {
        /// Name of the offending field.
        name: &'static str,
    },
}
