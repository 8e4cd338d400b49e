use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Raw targets, actuals and aggregated magnitudes. Wraps Decimal to prevent
/// accidental f64 usage.
pub type Metric = Decimal;

/// Achievement percentages (75 = 75%). Unclamped; may exceed 100.
pub type Percent = Decimal;

/// Month keys in `YYYY-MM` form, as stored on the monthly series maps.
pub type MonthKey = String;

/// How a key result's monthly series collapses into a single number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationType {
    #[default]
    Sum,
    Average,
    Min,
    Max,
}

impl AggregationType {
    /// Decode a stored string, falling back to `sum` for unknown values.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "average" => AggregationType::Average,
            "min" => AggregationType::Min,
            "max" => AggregationType::Max,
            _ => AggregationType::Sum,
        }
    }
}

/// Whether a key result is beaten by exceeding its target or staying under it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetDirection {
    #[default]
    Maximize,
    Minimize,
}

impl TargetDirection {
    /// Decode a stored string, falling back to `maximize` for unknown values.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "minimize" => TargetDirection::Minimize,
            _ => TargetDirection::Maximize,
        }
    }
}

fn lenient_aggregation<'de, D>(deserializer: D) -> Result<AggregationType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(AggregationType::from_str_or_default)
        .unwrap_or_default())
}

fn lenient_direction<'de, D>(deserializer: D) -> Result<TargetDirection, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(TargetDirection::from_str_or_default)
        .unwrap_or_default())
}

fn default_weight() -> Metric {
    Decimal::ONE
}

/// A measurable sub-goal with monthly target/actual series.
///
/// The two monthly maps are keyed independently: a month may carry a target
/// without an actual or vice versa. Entries absent from a map are absent for
/// the has-data gate, never implicit zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResult {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub objective_id: String,
    /// Scalar fallback target, used when both monthly series are empty
    #[serde(default)]
    pub target_value: Metric,
    /// Scalar fallback actual
    #[serde(default)]
    pub current_value: Metric,
    #[serde(default)]
    pub monthly_targets: BTreeMap<MonthKey, Metric>,
    #[serde(default)]
    pub monthly_actual: BTreeMap<MonthKey, Metric>,
    /// Stored as a free string by the persistence layer; unknown values
    /// decode as `sum`
    #[serde(default, deserialize_with = "lenient_aggregation")]
    pub aggregation_type: AggregationType,
    /// Unknown values decode as `maximize`
    #[serde(default, deserialize_with = "lenient_direction")]
    pub target_direction: TargetDirection,
    /// Relative weight under the owning objective; honored only by the
    /// weighted rollup extension
    #[serde(default = "default_weight")]
    pub weight: Metric,
}

/// A strategic goal composed of key results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub pillar_id: String,
}

/// A top-level strategic category composed of objectives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
