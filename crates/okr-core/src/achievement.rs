use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Metric, Percent, TargetDirection};

const HUNDRED: Decimal = dec!(100);

/// Convert an aggregated (target, actual) pair into an achievement percentage.
///
/// Maximize: actual over target. Minimize: target over actual, so that
/// staying under budget reads above 100. A zero minimize-target with a zero
/// actual is full success (no threshold, no occurrence); with a positive
/// actual it is zero. Output is unclamped above 100 and floored at zero.
pub fn achievement(target: Metric, actual: Metric, direction: TargetDirection) -> Percent {
    let pct = match direction {
        TargetDirection::Maximize => {
            if target > Decimal::ZERO {
                actual / target * HUNDRED
            } else {
                Decimal::ZERO
            }
        }
        TargetDirection::Minimize => {
            if target.is_zero() {
                if actual.is_zero() {
                    HUNDRED
                } else {
                    Decimal::ZERO
                }
            } else if target > Decimal::ZERO && actual > Decimal::ZERO {
                target / actual * HUNDRED
            } else {
                // a minimize KR with no occurrences yet has achieved nothing
                Decimal::ZERO
            }
        }
    };
    pct.max(Decimal::ZERO)
}

/// Clamp a percentage to [0, 100] for progress-bar rendering.
///
/// Display-only: computed and stored percentages stay unclamped so that
/// over-achievement remains visible to the classifier.
pub fn clamp_for_display(percentage: Percent) -> Percent {
    percentage.clamp(Decimal::ZERO, HUNDRED)
}
