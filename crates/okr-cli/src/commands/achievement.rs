use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use okr_core::achievement::{achievement, clamp_for_display};
use okr_core::classify::classify;
use okr_core::types::TargetDirection;
use okr_core::PerformanceBand;

/// Arguments for a single achievement calculation
#[derive(Args)]
pub struct AchievementArgs {
    /// Aggregated target for the window
    #[arg(long, allow_hyphen_values = true)]
    pub target: Decimal,

    /// Aggregated actual for the window
    #[arg(long, allow_hyphen_values = true)]
    pub actual: Decimal,

    /// Optimization direction: maximize or minimize
    #[arg(long, default_value = "maximize")]
    pub direction: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AchievementOutput {
    percentage: Decimal,
    /// Clamped to [0, 100] for progress-bar rendering
    display_percentage: Decimal,
    band: PerformanceBand,
    label: String,
    style: String,
}

pub fn run_achievement(args: AchievementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let direction = parse_direction(&args.direction)?;
    let percentage = achievement(args.target, args.actual, direction);
    let band = classify(percentage);

    Ok(serde_json::to_value(AchievementOutput {
        percentage,
        display_percentage: clamp_for_display(percentage),
        band,
        label: band.label().to_string(),
        style: band.style_key().to_string(),
    })?)
}

fn parse_direction(raw: &str) -> Result<TargetDirection, Box<dyn std::error::Error>> {
    match raw.to_lowercase().as_str() {
        "maximize" => Ok(TargetDirection::Maximize),
        "minimize" => Ok(TargetDirection::Minimize),
        other => Err(format!("Unknown direction '{}'. Use: maximize, minimize", other).into()),
    }
}
