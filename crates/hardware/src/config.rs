//! Configuration system for the LLC replacement engine.
//!
//! This module defines the structures used to parameterize the engine. It provides:
//! 1. **Defaults:** The LLC geometry and predictor thresholds of the reference design.
//! 2. **Structures:** LLC geometry and bypass-predictor tuning.
//! 3. **Validation:** Rejection of geometries the engine cannot index.
//!
//! Configuration is supplied as JSON by the host harness, or use `ReplacementConfig::default()`.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the engine.
mod defaults {
    /// Number of LLC sets (2 MiB, 16-way, 64-byte lines).
    pub const LLC_SETS: usize = 2048;

    /// LLC associativity.
    pub const LLC_WAYS: usize = 16;

    /// log2 of the cache block size (64-byte blocks).
    pub const BLOCK_OFFSET: u32 = 6;

    /// log2 of the instruction word size used to hash PCs.
    pub const WORD_OFFSET: u32 = 2;

    /// Every Nth ART lookup inserts into the ART regardless of the PCRT ratio.
    pub const EXPLORATION_PERIOD: u64 = 8;

    /// Upper bound of the tracking band: insert while `reused * 64 > not_reused`.
    pub const TRACK_RATIO: u32 = 64;

    /// Bypass while `reused * 3 < not_reused`.
    pub const BYPASS_RATIO: u32 = 3;
}

/// Root configuration structure for one LLC replacement instance.
///
/// # Examples
///
/// ```
/// use reuse_llc::config::ReplacementConfig;
///
/// let config = ReplacementConfig::default();
/// assert_eq!(config.llc.ways, 16);
/// assert_eq!(config.predictor.block_offset, 6);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use reuse_llc::config::ReplacementConfig;
///
/// let json = r#"{
///     "llc": { "sets": 4096, "ways": 16 },
///     "predictor": { "exploration_period": 16 }
/// }"#;
///
/// let config = ReplacementConfig::from_json(json).unwrap();
/// assert_eq!(config.llc.sets, 4096);
/// assert_eq!(config.predictor.exploration_period, 16);
/// assert_eq!(config.predictor.bypass_ratio, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ReplacementConfig {
    /// Shape of the simulated last-level cache
    #[serde(default)]
    pub llc: LlcGeometry,
    /// Bypass predictor tuning
    #[serde(default)]
    pub predictor: PredictorConfig,
}

impl ReplacementConfig {
    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error from
    /// [`ReplacementConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can be indexed without wrapping or dividing by zero.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.llc.sets == 0 || self.llc.ways == 0 {
            return Err(ConfigError::EmptyGeometry {
                sets: self.llc.sets,
                ways: self.llc.ways,
            });
        }
        if self.predictor.block_offset >= u64::BITS {
            return Err(ConfigError::OffsetOutOfRange {
                name: "block_offset",
                value: self.predictor.block_offset,
            });
        }
        if self.predictor.word_offset >= u64::BITS {
            return Err(ConfigError::OffsetOutOfRange {
                name: "word_offset",
                value: self.predictor.word_offset,
            });
        }
        if self.predictor.exploration_period == 0 {
            return Err(ConfigError::ZeroParameter {
                name: "exploration_period",
            });
        }
        if self.predictor.bypass_ratio == 0 {
            return Err(ConfigError::ZeroParameter {
                name: "bypass_ratio",
            });
        }
        Ok(())
    }
}

/// Geometry of the simulated last-level cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LlcGeometry {
    /// Number of sets
    #[serde(default = "LlcGeometry::default_sets")]
    pub sets: usize,
    /// Associativity; also the bypass sentinel returned by victim selection
    #[serde(default = "LlcGeometry::default_ways")]
    pub ways: usize,
}

impl LlcGeometry {
    fn default_sets() -> usize {
        defaults::LLC_SETS
    }

    fn default_ways() -> usize {
        defaults::LLC_WAYS
    }
}

impl Default for LlcGeometry {
    fn default() -> Self {
        Self {
            sets: defaults::LLC_SETS,
            ways: defaults::LLC_WAYS,
        }
    }
}

/// Tuning of the reuse-detector bypass predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PredictorConfig {
    /// Shift turning a physical address into a block number
    #[serde(default = "PredictorConfig::default_block_offset")]
    pub block_offset: u32,
    /// Shift applied to the PC before bucketing into the PCRT
    #[serde(default = "PredictorConfig::default_word_offset")]
    pub word_offset: u32,
    /// Forced ART insertion whenever the lookup counter is a multiple of this
    #[serde(default = "PredictorConfig::default_exploration_period")]
    pub exploration_period: u64,
    /// Insertion band upper limit: track while `reused * track_ratio > not_reused`
    #[serde(default = "PredictorConfig::default_track_ratio")]
    pub track_ratio: u32,
    /// Bypass (and band lower limit) while `reused * bypass_ratio < not_reused`
    #[serde(default = "PredictorConfig::default_bypass_ratio")]
    pub bypass_ratio: u32,
}

impl PredictorConfig {
    fn default_block_offset() -> u32 {
        defaults::BLOCK_OFFSET
    }

    fn default_word_offset() -> u32 {
        defaults::WORD_OFFSET
    }

    fn default_exploration_period() -> u64 {
        defaults::EXPLORATION_PERIOD
    }

    fn default_track_ratio() -> u32 {
        defaults::TRACK_RATIO
    }

    fn default_bypass_ratio() -> u32 {
        defaults::BYPASS_RATIO
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            block_offset: defaults::BLOCK_OFFSET,
            word_offset: defaults::WORD_OFFSET,
            exploration_period: defaults::EXPLORATION_PERIOD,
            track_ratio: defaults::TRACK_RATIO,
            bypass_ratio: defaults::BYPASS_RATIO,
        }
    }
}
