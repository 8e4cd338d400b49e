use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use okr_core::aggregate::aggregate;
use okr_core::types::AggregationType;

use crate::input;

/// Arguments for series aggregation
#[derive(Args)]
pub struct AggregateArgs {
    /// Comma-separated monthly values (e.g. "10,12.5,9")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Option<Vec<Decimal>>,

    /// Path to a JSON file with a values array
    #[arg(long)]
    pub input: Option<String>,

    /// Aggregation mode: sum, average, min, max
    #[arg(long, default_value = "sum")]
    pub mode: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AggregateOutput {
    aggregated: Decimal,
    mode: AggregationType,
    observations: usize,
}

pub fn run_aggregate(args: AggregateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let values = collect_values(&args)?;
    let mode = parse_mode(&args.mode)?;

    Ok(serde_json::to_value(AggregateOutput {
        aggregated: aggregate(&values, mode),
        mode,
        observations: values.len(),
    })?)
}

fn collect_values(args: &AggregateArgs) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        let data: Value = input::read_json(path)?;
        decode_values(&data)
    } else if let Some(ref values) = args.values {
        Ok(values.clone())
    } else if let Some(data) = input::read_stdin()? {
        decode_values(&data)
    } else {
        Err("Provide --values, --input file, or pipe JSON via stdin".into())
    }
}

/// Accept either a bare JSON array or an object carrying a `values` array.
fn decode_values(data: &Value) -> Result<Vec<Decimal>, Box<dyn std::error::Error>> {
    let arr = match data {
        Value::Array(arr) => arr,
        Value::Object(map) => map
            .get("values")
            .and_then(Value::as_array)
            .ok_or("JSON object must contain a 'values' array")?,
        _ => return Err("Expected a JSON array of values or an object with a 'values' key".into()),
    };

    arr.iter()
        .map(|v| -> Result<Decimal, Box<dyn std::error::Error>> {
            match v {
                Value::String(s) => Ok(s.parse::<Decimal>()?),
                Value::Number(n) => Ok(Decimal::try_from(n.as_f64().unwrap_or_default())?),
                other => Err(format!("Not a numeric value: {other}").into()),
            }
        })
        .collect()
}

fn parse_mode(raw: &str) -> Result<AggregationType, Box<dyn std::error::Error>> {
    match raw.to_lowercase().as_str() {
        "sum" => Ok(AggregationType::Sum),
        "average" => Ok(AggregationType::Average),
        "min" => Ok(AggregationType::Min),
        "max" => Ok(AggregationType::Max),
        other => Err(format!("Unknown mode '{}'. Use: sum, average, min, max", other).into()),
    }
}
