//! Last-Level Cache Replacement Engine.
//!
//! This module implements the replacement hooks a trace-driven simulator calls
//! for its LLC. It composes the reuse-detector bypass predictor with an eviction
//! policy (SRRIP by default):
//! 1. **Decide:** the predictor may bypass the incoming block; otherwise the
//!    eviction policy names a victim way.
//! 2. **Update:** once the host committed the fill or hit, the eviction policy
//!    folds in the outcome. Predictor state was already trained while deciding.
//!
//! The bypass decision is reported as a way index equal to the associativity.

/// Cache eviction policy implementations (SRRIP, FIFO).
pub mod policies;

use tracing::{error, info};

use self::policies::{EvictionPolicy, SrripPolicy};
use crate::common::{AccessType, ProtocolError};
use crate::config::ReplacementConfig;
use crate::core::units::reuse::ReuseDetector;
use crate::stats::ReplacementStats;

/// Host view of one resident line, passed with each victim request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineSnapshot {
    /// Line holds data.
    pub valid: bool,
    /// Line differs from memory.
    pub dirty: bool,
    /// Block-aligned physical address of the line.
    pub address: u64,
}

/// Replacement state of one simulated LLC.
///
/// One instance per cache; multi-core harnesses give each core its own instance
/// or serialize access to a shared one.
#[derive(Debug, Clone)]
pub struct LlcReplacement<P = SrripPolicy> {
    detector: ReuseDetector,
    policy: P,
    sets: usize,
    ways: usize,
    stats: ReplacementStats,
}

impl LlcReplacement<SrripPolicy> {
    /// Creates the reuse-detector + SRRIP engine for the configured geometry.
    ///
    /// # Arguments
    ///
    /// * `config` - LLC geometry and predictor tuning.
    pub fn new(config: &ReplacementConfig) -> Self {
        let policy = SrripPolicy::new(config.llc.sets, config.llc.ways);
        Self::with_policy(config, policy)
    }
}

impl<P: EvictionPolicy> LlcReplacement<P> {
    /// Creates an engine around a caller-supplied eviction policy.
    ///
    /// The policy must already be sized for `config.llc`.
    pub fn with_policy(config: &ReplacementConfig, policy: P) -> Self {
        let mut llc = Self {
            detector: ReuseDetector::new(&config.predictor),
            policy,
            sets: config.llc.sets,
            ways: config.llc.ways,
            stats: ReplacementStats::default(),
        };
        llc.initialize();
        llc
    }

    /// Returns every table to its power-on state and clears statistics.
    ///
    /// Idempotent.
    pub fn initialize(&mut self) {
        self.detector.initialize();
        self.policy.reset();
        self.stats = ReplacementStats::default();
        info!(
            sets = self.sets,
            ways = self.ways,
            "LLC replacement initialized (reuse detector + eviction policy)"
        );
    }

    /// Way index signalling "do not store this block".
    pub const fn bypass_way(&self) -> usize {
        self.ways
    }

    /// Chooses where the block at `address` goes, or bypasses it.
    ///
    /// # Arguments
    ///
    /// * `core_id` - Requesting core (unused; state is per cache instance).
    /// * `access_id` - Host instruction/request id (unused).
    /// * `set` - LLC set the block maps to.
    /// * `current_set` - Host snapshot of the set's lines (unused).
    /// * `pc` - Requesting instruction address (`0` for write-backs).
    /// * `address` - Physical address of the block.
    /// * `access` - Request type.
    ///
    /// # Returns
    ///
    /// A way in `0..ways`, or [`bypass_way`](Self::bypass_way).
    ///
    /// # Panics
    ///
    /// Panics if a write-back carries a non-zero `pc`, or `set` is outside the geometry.
    /// The write-back check also runs in [`update`](Self::update); doing it here
    /// rejects the request before it reaches the predictor.
    #[allow(clippy::too_many_arguments)]
    pub fn decide_and_select(
        &mut self,
        _core_id: u32,
        _access_id: u64,
        set: usize,
        _current_set: &[LineSnapshot],
        pc: u64,
        address: u64,
        access: AccessType,
    ) -> usize {
        check_attribution(access, pc);
        self.stats.record_access(access);

        if self.detector.decide(address, pc, access).is_bypass() {
            return self.ways;
        }

        self.stats.victim_selections += 1;
        self.policy.select_victim(set)
    }

    /// Folds a committed hit or fill into the eviction policy.
    ///
    /// No-op for the bypass way and for write-backs.
    ///
    /// # Panics
    ///
    /// Panics if a write-back carries a non-zero `pc`, or `set`/`way` lie
    /// outside the geometry.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        _core_id: u32,
        set: usize,
        way: usize,
        _address: u64,
        pc: u64,
        _evicted_address: u64,
        access: AccessType,
        hit: bool,
    ) {
        check_attribution(access, pc);
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }

        if way == self.ways || access.is_writeback() {
            return;
        }
        self.policy.update(set, way, hit);
    }

    /// Snapshot of the engine's statistics. Decision state is not touched.
    pub fn finalize_stats(&self) -> ReplacementStats {
        ReplacementStats {
            predictor: *self.detector.stats(),
            ..self.stats
        }
    }

    /// The bypass predictor.
    pub const fn detector(&self) -> &ReuseDetector {
        &self.detector
    }

    /// Mutable bypass predictor, for warm-starting its tables.
    pub const fn detector_mut(&mut self) -> &mut ReuseDetector {
        &mut self.detector
    }

    /// The eviction policy.
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Mutable eviction policy.
    pub const fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}

/// Decodes a raw host access-type code, aborting on codes outside the vocabulary.
///
/// # Panics
///
/// Panics with [`ProtocolError::UnknownAccessType`] for unknown codes.
pub fn decode_access_type(raw: u32) -> AccessType {
    match AccessType::from_raw(raw) {
        Ok(access) => access,
        Err(err) => protocol_violation(err),
    }
}

fn check_attribution(access: AccessType, pc: u64) {
    if access.is_writeback() && pc != 0 {
        protocol_violation(ProtocolError::AttributedWriteback { pc });
    }
}

#[cold]
fn protocol_violation(err: ProtocolError) -> ! {
    error!(%err, "LLC calling protocol violated");
    panic!("LLC calling protocol violated: {err}");
}
