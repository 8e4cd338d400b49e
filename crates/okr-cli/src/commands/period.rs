use clap::Args;
use serde::Serialize;
use serde_json::Value;

use okr_core::period::resolve_month_keys;

/// Arguments for period resolution
#[derive(Args)]
pub struct PeriodArgs {
    /// Period type: ytd, monthly, quarterly, yearly
    #[arg(long, default_value = "ytd")]
    pub period: String,

    /// Year (required for monthly, quarterly, yearly)
    #[arg(long)]
    pub year: Option<i32>,

    /// Month 1-12 (required for monthly)
    #[arg(long)]
    pub month: Option<u32>,

    /// Quarter 1-4 (required for quarterly)
    #[arg(long)]
    pub quarter: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PeriodOutput {
    label: String,
    months: Vec<String>,
}

pub fn run_resolve_period(args: PeriodArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let period = super::parse_period(&args.period, args.year, args.month, args.quarter)?;
    let months = resolve_month_keys(&period)?;

    Ok(serde_json::to_value(PeriodOutput {
        label: period.label(),
        months,
    })?)
}
