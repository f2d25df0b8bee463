//! Property tests for operator answer validation

use quickcheck_macros::quickcheck;
use sharekeep::domain::{ShareCount, SplitConfig, SplitMode};

/// Every integer maps to single, split, or rejection; never clamped
#[quickcheck]
fn prop_share_count_routing(value: i64) -> bool {
    let parsed = SplitMode::parse(&value.to_string());
    match value {
        0 | 1 => matches!(parsed, Ok(SplitMode::Single)),
        2..=9 => matches!(parsed, Ok(SplitMode::Split(n)) if i64::from(*n) == value),
        _ => parsed.is_err(),
    }
}

/// Non-numeric answers are rejected
#[quickcheck]
fn prop_non_numeric_share_count_rejected(text: String) -> bool {
    if text.trim().parse::<i64>().is_ok() {
        return true;
    }
    SplitMode::parse(&text).is_err()
}

/// Thresholds are accepted exactly when 1 < t <= n
#[quickcheck]
fn prop_threshold_bounds(raw_count: u8, threshold: i16) -> bool {
    let Ok(count) = ShareCount::new((raw_count % 8) + 2) else {
        return false;
    };
    let accepted = SplitConfig::from_answer(&threshold.to_string(), count).is_ok();
    accepted == (threshold > 1 && threshold <= i16::from(*count))
}
