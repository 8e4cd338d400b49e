use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Percent;

const ON_TARGET_CEILING: Decimal = dec!(105);
const ON_TARGET_FLOOR: Decimal = dec!(100);
const ATTENTION_FLOOR: Decimal = dec!(71);

/// Performance band shared by every level of the scorecard.
///
/// "No data" is not a band: callers carry it as `Option<PerformanceBand>`
/// so a silent KR renders as a dash instead of red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceBand {
    Critical,
    Attention,
    OnTarget,
    Excellent,
}

impl PerformanceBand {
    /// Stable key for UI styling (chip and progress-bar colors).
    pub fn style_key(&self) -> &'static str {
        match self {
            PerformanceBand::Critical => "critical",
            PerformanceBand::Attention => "attention",
            PerformanceBand::OnTarget => "on-target",
            PerformanceBand::Excellent => "excellent",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceBand::Critical => "Critical",
            PerformanceBand::Attention => "Attention",
            PerformanceBand::OnTarget => "On Target",
            PerformanceBand::Excellent => "Excellent",
        }
    }
}

/// Map a percentage to its band. There is exactly one banding policy in the
/// system; KRs, objectives, pillars and the company score all use this one.
pub fn classify(percentage: Percent) -> PerformanceBand {
    if percentage > ON_TARGET_CEILING {
        PerformanceBand::Excellent
    } else if percentage >= ON_TARGET_FLOOR {
        PerformanceBand::OnTarget
    } else if percentage >= ATTENTION_FLOOR {
        PerformanceBand::Attention
    } else {
        PerformanceBand::Critical
    }
}
