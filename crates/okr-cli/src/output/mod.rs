pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// True when the value is a scorecard envelope whose result holds the
/// pillar hierarchy.
pub(crate) fn scorecard_result(value: &Value) -> Option<&Value> {
    value
        .get("result")
        .filter(|result| result.get("pillars").is_some())
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Display name for a scorecard node, falling back to its id.
pub(crate) fn node_name(node: &Value) -> &str {
    node.get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| node.get("id").and_then(Value::as_str))
        .unwrap_or("?")
}
