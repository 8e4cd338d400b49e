use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use okr_core::classify::classify;
use okr_core::PerformanceBand;

/// Arguments for band classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// Percentage to classify (unclamped)
    #[arg(long, allow_hyphen_values = true)]
    pub percentage: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyOutput {
    band: PerformanceBand,
    label: String,
    style: String,
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let band = classify(args.percentage);

    Ok(serde_json::to_value(ClassifyOutput {
        band,
        label: band.label().to_string(),
        style: band.style_key().to_string(),
    })?)
}
