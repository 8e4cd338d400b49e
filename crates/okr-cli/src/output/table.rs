use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_value, node_name, scorecard_result};

/// Format output as a table using the tabled crate.
///
/// Scorecard envelopes are flattened into one row per hierarchy node;
/// everything else falls back to a field/value listing.
pub fn print_table(value: &Value) {
    if let Some(card) = scorecard_result(value) {
        print_scorecard_table(card, value);
        return;
    }

    match value {
        Value::Object(_) => print_flat_object(value),
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_scorecard_table(card: &Value, envelope: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Level", "Name", "Target", "Actual", "Progress", "Band"]);

    let company = card
        .get("periodLabel")
        .and_then(Value::as_str)
        .unwrap_or("Company");
    push_node(&mut builder, "Company", company, None, None, card.get("result"));

    if let Some(Value::Array(pillars)) = card.get("pillars") {
        for pillar in pillars {
            push_node(
                &mut builder,
                "Pillar",
                node_name(pillar),
                None,
                None,
                pillar.get("result"),
            );
            if let Some(Value::Array(objectives)) = pillar.get("objectives") {
                for objective in objectives {
                    push_node(
                        &mut builder,
                        "Objective",
                        node_name(objective),
                        None,
                        None,
                        objective.get("result"),
                    );
                    if let Some(Value::Array(krs)) = objective.get("keyResults") {
                        for kr in krs {
                            push_node(
                                &mut builder,
                                "KR",
                                node_name(kr),
                                kr.get("aggregatedTarget"),
                                kr.get("aggregatedActual"),
                                kr.get("result"),
                            );
                        }
                    }
                }
            }
        }
    }

    println!("{}", Table::from(builder));

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn push_node(
    builder: &mut Builder,
    level: &str,
    name: &str,
    target: Option<&Value>,
    actual: Option<&Value>,
    result: Option<&Value>,
) {
    let (progress, band) = match result {
        Some(res) if res.get("hasData").and_then(Value::as_bool).unwrap_or(false) => (
            res.get("percentage")
                .map(|p| format!("{}%", format_value(p)))
                .unwrap_or_default(),
            res.get("band").map(format_value).unwrap_or_default(),
        ),
        // silent nodes render as a dash, never as zero
        _ => ("—".to_string(), "—".to_string()),
    };

    builder.push_record([
        level.to_string(),
        name.to_string(),
        target.map(format_value).unwrap_or_default(),
        actual.map(format_value).unwrap_or_default(),
        progress,
        band,
    ]);
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}
