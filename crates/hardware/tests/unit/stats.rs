//! Statistics Tests.
//!
//! Verifies request-mix counting, derived rates and JSON serialization of
//! [`ReplacementStats`].

use reuse_llc::AccessType;
use reuse_llc::stats::{PredictorStats, ReplacementStats};

#[test]
fn rates_are_zero_without_samples() {
    let stats = ReplacementStats::default();
    assert!(stats.bypass_rate().abs() < f64::EPSILON);
    assert!(stats.hit_rate().abs() < f64::EPSILON);
    assert!(stats.predictor.art_hit_rate().abs() < f64::EPSILON);
}

#[test]
fn record_access_counts_each_type() {
    let mut stats = ReplacementStats::default();
    for access in AccessType::ALL {
        stats.record_access(access);
    }
    stats.record_access(AccessType::Load);

    assert_eq!(stats.accesses, 5);
    assert_eq!(stats.loads, 2);
    assert_eq!(stats.rfos, 1);
    assert_eq!(stats.prefetches, 1);
    assert_eq!(stats.writebacks, 1);
}

#[test]
fn derived_rates() {
    let stats = ReplacementStats {
        accesses: 8,
        hits: 3,
        misses: 1,
        predictor: PredictorStats {
            art_lookups: 10,
            art_hits: 5,
            bypasses: 2,
            ..PredictorStats::default()
        },
        ..ReplacementStats::default()
    };
    assert!((stats.bypass_rate() - 0.25).abs() < 1e-12);
    assert!((stats.hit_rate() - 0.75).abs() < 1e-12);
    assert!((stats.predictor.art_hit_rate() - 0.5).abs() < 1e-12);
}

#[test]
fn serializes_nested_predictor_counters() {
    let stats = ReplacementStats {
        loads: 4,
        predictor: PredictorStats {
            art_evictions: 7,
            ..PredictorStats::default()
        },
        ..ReplacementStats::default()
    };
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["loads"], 4);
    assert_eq!(json["predictor"]["art_evictions"], 7);
}
