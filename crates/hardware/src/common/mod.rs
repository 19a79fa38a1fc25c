//! Common types and constants shared by the replacement engine.
//!
//! This module provides the building blocks used by every component. It includes:
//! 1. **Constants:** Fixed ART, PCRT and SRRIP geometry.
//! 2. **Access Types:** The LLC request vocabulary consumed from the host simulator.
//! 3. **Error Handling:** Protocol and configuration error types.

/// Table geometry constants.
pub mod constants;

/// LLC access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use data::AccessType;
pub use error::{ConfigError, ProtocolError};
