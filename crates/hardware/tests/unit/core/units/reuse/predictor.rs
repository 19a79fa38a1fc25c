//! Reuse Detector Decision Tests.
//!
//! Verifies the admit/bypass decision, the ART insertion band, periodic
//! exploration, and that write-backs never reach the predictor.

use pretty_assertions::assert_eq;
use reuse_llc::{AccessType, ReplacementConfig};
use reuse_llc::config::PredictorConfig;
use reuse_llc::core::units::reuse::{Decision, PcrtEntry, ReuseDetector};
use reuse_llc::stats::PredictorStats;
use rstest::rstest;

use crate::common::harness::{addr_at, block_at, counters, init_tracing, pc_for};

const DEAD_PC_BUCKET: u8 = 0x31;

fn detector() -> ReuseDetector {
    init_tracing();
    ReuseDetector::new(&PredictorConfig::default())
}

// ══════════════════════════════════════════════════════════
// 1. Admission paths
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(AccessType::Load)]
#[case(AccessType::Rfo)]
#[case(AccessType::Prefetch)]
fn cold_pc_is_admitted(#[case] access: AccessType) {
    let mut rd = detector();
    assert_eq!(rd.decide(addr_at(3, 1, 0), pc_for(1), access), Decision::Admit);
    assert_eq!(rd.art().lookups(), 1);
}

#[test]
fn writeback_skips_predictor() {
    let mut rd = detector();
    rd.pcrt_mut().set_entry(0, counters(0, 1000));

    assert_eq!(
        rd.decide(addr_at(3, 1, 0), 0, AccessType::Writeback),
        Decision::Admit
    );
    assert_eq!(rd.art().lookups(), 0);
    assert_eq!(rd.stats(), &PredictorStats::default());
}

#[test]
fn art_hit_admits_even_for_dead_pc() {
    let mut rd = detector();
    let pc = pc_for(DEAD_PC_BUCKET);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(0, 1000));
    {
        let (art, pcrt) = rd.tables_mut();
        let _ = art.insert(pcrt, pc, block_at(6, 2, 1));
    }

    assert_eq!(rd.decide(addr_at(6, 2, 1), pc, AccessType::Load), Decision::Admit);
    assert_eq!(rd.stats().art_hits, 1);
    assert_eq!(rd.stats().bypasses, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Bypass rule
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::at_boundary(1, 3, Decision::Admit)]
#[case::past_boundary(1, 4, Decision::Bypass)]
#[case::never_reused(0, 1, Decision::Bypass)]
#[case::no_evidence(0, 0, Decision::Admit)]
#[case::scaled_boundary(2, 6, Decision::Admit)]
#[case::scaled_past(2, 7, Decision::Bypass)]
#[case::saturated(1023, 1023, Decision::Admit)]
fn bypass_ratio_boundary(
    #[case] reused: u16,
    #[case] not_reused: u16,
    #[case] expected: Decision,
) {
    let mut rd = detector();
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(reused, not_reused));
    let decision = rd.decide(addr_at(40, 5, 3), pc_for(DEAD_PC_BUCKET), AccessType::Load);
    assert_eq!(decision, expected);
}

#[test]
fn bypass_ratio_is_configurable() {
    init_tracing();
    let config = PredictorConfig {
        bypass_ratio: 5,
        ..PredictorConfig::default()
    };
    let mut rd = ReuseDetector::new(&config);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(1, 4));
    assert_eq!(
        rd.decide(addr_at(40, 5, 3), pc_for(DEAD_PC_BUCKET), AccessType::Load),
        Decision::Admit
    );
}

/// Ratios far above the counter range are accepted by the config loader and
/// must not overflow against a saturated bucket.
#[test]
fn huge_ratios_on_saturated_bucket() {
    init_tracing();
    let config = ReplacementConfig::from_json(
        r#"{ "predictor": { "bypass_ratio": 5000000, "track_ratio": 5000000 } }"#,
    )
    .unwrap();
    let mut rd = ReuseDetector::new(&config.predictor);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(1023, 1023));

    let decision = rd.decide(addr_at(40, 5, 3), pc_for(DEAD_PC_BUCKET), AccessType::Load);
    assert_eq!(decision, Decision::Admit);
    assert_eq!(rd.stats().art_insertions, 0);
}

// ══════════════════════════════════════════════════════════
// 3. Insertion rule
// ══════════════════════════════════════════════════════════

/// Moderately reuse-poor PCs are tracked and bypassed on the same access.
#[test]
fn in_band_miss_is_tracked_and_bypassed() {
    let mut rd = detector();
    let pc = pc_for(DEAD_PC_BUCKET);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(1, 10));
    let addr = addr_at(9, 4, 2);

    assert_eq!(rd.decide(addr, pc, AccessType::Load), Decision::Bypass);
    assert!(rd.art().way(9, 0).is_valid(2));
    assert_eq!(rd.stats().art_insertions, 1);

    assert_eq!(
        rd.decide(addr, pc, AccessType::Load),
        Decision::Admit,
        "re-reference of a tracked block is admitted"
    );
}

#[rstest]
#[case::too_reuse_poor(1, 100)]
#[case::reuse_friendly(5, 10)]
#[case::cold(3, 0)]
fn out_of_band_miss_is_not_tracked(#[case] reused: u16, #[case] not_reused: u16) {
    let mut rd = detector();
    let pc = pc_for(DEAD_PC_BUCKET);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(reused, not_reused));

    let _ = rd.decide(addr_at(9, 4, 2), pc, AccessType::Prefetch);
    assert_eq!(rd.art().way(9, 0).tracked(), 0);
    assert_eq!(rd.art().cursor(9), 0);
    assert_eq!(rd.stats().art_insertions, 0);
}

/// Every eighth ART lookup inserts regardless of the PC's ratio.
#[test]
fn periodic_exploration_inserts_every_eighth_lookup() {
    let mut rd = detector();
    let pc = pc_for(DEAD_PC_BUCKET);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(0, 1000));

    for set in 1..=16 {
        let decision = rd.decide(addr_at(set, 1, 0), pc, AccessType::Load);
        assert_eq!(decision, Decision::Bypass);
        assert_eq!(rd.art().lookups(), set as u64);
    }

    for set in 1..=16 {
        let tracked = rd.art().way(set, 0).is_valid(0);
        assert_eq!(tracked, set % 8 == 0, "set {set}");
    }
    assert_eq!(rd.stats().art_insertions, 2);
    assert_eq!(rd.stats().bypasses, 16);
}

#[test]
fn art_hits_advance_exploration_counter() {
    let mut rd = detector();
    let pc = pc_for(DEAD_PC_BUCKET);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(1, 10));

    // Lookup 1 tracks the block, lookup 2 consumes it.
    let _ = rd.decide(addr_at(2, 1, 0), pc, AccessType::Load);
    let _ = rd.decide(addr_at(2, 1, 0), pc, AccessType::Load);
    assert_eq!(rd.art().lookups(), 2);

    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(0, 1000));
    for set in 3..=8 {
        let _ = rd.decide(addr_at(set, 1, 0), pc, AccessType::Load);
    }
    assert!(rd.art().way(8, 0).is_valid(0), "lookup 8 explores");
    assert!(!rd.art().way(7, 0).is_valid(0));
}

#[test]
fn exploration_period_is_configurable() {
    init_tracing();
    let config = PredictorConfig {
        exploration_period: 1,
        ..PredictorConfig::default()
    };
    let mut rd = ReuseDetector::new(&config);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(0, 1000));
    for set in 1..=5 {
        let _ = rd.decide(addr_at(set, 1, 0), pc_for(DEAD_PC_BUCKET), AccessType::Rfo);
        assert!(rd.art().way(set, 0).is_valid(0));
    }
}

/// Both rules read the counters as they were before the insertion, even when
/// the insertion itself charges the deciding PC.
#[test]
fn rules_share_pre_insertion_ratio() {
    let mut rd = detector();
    let pc = pc_for(DEAD_PC_BUCKET);
    {
        let (art, pcrt) = rd.tables_mut();
        for pat in 1..=16 {
            let _ = art.insert(pcrt, pc, block_at(0, pat, 0));
        }
    }
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(1, 3));

    for set in 1..=7 {
        let _ = rd.decide(addr_at(set, 1, 0), pc_for(2), AccessType::Load);
    }
    let decision = rd.decide(addr_at(0, 200, 0), pc, AccessType::Load);

    assert_eq!(decision, Decision::Admit);
    assert_eq!(rd.pcrt().entry(DEAD_PC_BUCKET), counters(1, 4));
    assert_eq!(rd.stats().art_evictions, 1);
}

// ══════════════════════════════════════════════════════════
// 4. Geometry and lifecycle
// ══════════════════════════════════════════════════════════

#[test]
fn block_offset_selects_block_number() {
    init_tracing();
    let config = PredictorConfig {
        block_offset: 7,
        ..PredictorConfig::default()
    };
    let mut rd = ReuseDetector::new(&config);
    let pc = pc_for(DEAD_PC_BUCKET);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(1, 10));

    let _ = rd.decide(block_at(11, 2, 3) << 7, pc, AccessType::Load);
    assert!(rd.art().way(11, 0).is_valid(3));
}

#[test]
fn initialize_restores_power_on_state() {
    let mut rd = detector();
    let pc = pc_for(DEAD_PC_BUCKET);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(1, 10));
    for set in 0..20 {
        let _ = rd.decide(addr_at(set, 3, 1), pc, AccessType::Load);
    }

    rd.initialize();
    assert_eq!(rd.art().lookups(), 0);
    assert_eq!(rd.art().way(0, 0).pat(), 0);
    assert_eq!(rd.art().way(0, 0).tracked(), 0);
    assert!(rd.pcrt().iter().all(|&e| e == PcrtEntry::INITIAL));
    assert_eq!(rd.stats(), &PredictorStats::default());

    rd.initialize();
    assert_eq!(rd.art().lookups(), 0);
}

#[test]
fn stats_track_decisions() {
    let mut rd = detector();
    let pc = pc_for(DEAD_PC_BUCKET);
    rd.pcrt_mut().set_entry(DEAD_PC_BUCKET, counters(1, 10));

    let _ = rd.decide(addr_at(1, 1, 0), pc, AccessType::Load);
    let _ = rd.decide(addr_at(1, 1, 0), pc, AccessType::Load);
    let _ = rd.decide(addr_at(1, 2, 0), pc_for(3), AccessType::Load);
    let _ = rd.decide(addr_at(1, 2, 0), 0, AccessType::Writeback);

    assert_eq!(
        rd.stats(),
        &PredictorStats {
            art_lookups: 3,
            art_hits: 1,
            art_insertions: 1,
            art_evictions: 1,
            bypasses: 1,
        }
    );
}
