use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use okr_core::scorecard::{build_scorecard, ScorecardInput};
use okr_core::types::{KeyResult, Objective, Pillar};

use crate::input;

/// Arguments for the company scorecard
#[derive(Args)]
pub struct ScoreArgs {
    /// Path to a JSON file with pillars, objectives and keyResults
    #[arg(long)]
    pub input: Option<String>,

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

    /// Honor per-KR weights in the objective rollup
    #[arg(long)]
    pub weighted: bool,
}

/// Entity snapshot as exported by the persistence layer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entities {
    #[serde(default)]
    pillars: Vec<Pillar>,
    #[serde(default)]
    objectives: Vec<Objective>,
    #[serde(default)]
    key_results: Vec<KeyResult>,
}

pub fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let entities: Entities = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("Provide --input file or pipe entities JSON via stdin".into());
    };

    let period = super::parse_period(&args.period, args.year, args.month, args.quarter)?;
    let output = build_scorecard(&ScorecardInput {
        pillars: entities.pillars,
        objectives: entities.objectives,
        key_results: entities.key_results,
        period,
        use_weights: args.weighted,
    })?;
    Ok(serde_json::to_value(output)?)
}
