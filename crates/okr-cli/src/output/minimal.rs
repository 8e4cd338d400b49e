use serde_json::Value;

use super::format_value;

/// Print just the key answer value from the output.
///
/// For a scorecard envelope that is the company percentage; for the other
/// commands, the first matching priority field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // company scorecard: the node's own result level carries the score
    if let Some(pct) = result_obj
        .get("result")
        .and_then(|level| level.get("percentage"))
    {
        println!("{}", format_value(pct));
        return;
    }

    let priority_keys = ["percentage", "aggregated", "band", "months"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}
