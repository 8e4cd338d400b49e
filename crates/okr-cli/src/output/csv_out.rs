use serde_json::Value;
use std::io;

use super::{format_value, node_name, scorecard_result};

/// Write output as CSV to stdout.
///
/// Scorecard envelopes flatten to one row per hierarchy node; flat objects
/// fall back to field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(card) = scorecard_result(value) {
        write_scorecard_csv(&mut wtr, card);
    } else {
        match value {
            Value::Object(map) => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                }
            }
            Value::Array(arr) => write_array_csv(&mut wtr, arr),
            _ => {
                let _ = wtr.write_record([&format_value(value)]);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_scorecard_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, card: &Value) {
    let _ = wtr.write_record(["level", "name", "percentage", "band", "has_data"]);

    let company = card
        .get("periodLabel")
        .and_then(Value::as_str)
        .unwrap_or("Company");
    write_node(wtr, "company", company, card.get("result"));

    if let Some(Value::Array(pillars)) = card.get("pillars") {
        for pillar in pillars {
            write_node(wtr, "pillar", node_name(pillar), pillar.get("result"));
            if let Some(Value::Array(objectives)) = pillar.get("objectives") {
                for objective in objectives {
                    write_node(wtr, "objective", node_name(objective), objective.get("result"));
                    if let Some(Value::Array(krs)) = objective.get("keyResults") {
                        for kr in krs {
                            write_node(wtr, "key_result", node_name(kr), kr.get("result"));
                        }
                    }
                }
            }
        }
    }
}

fn write_node(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    level: &str,
    name: &str,
    result: Option<&Value>,
) {
    let (percentage, band, has_data) = match result {
        Some(res) => (
            res.get("percentage").map(format_value).unwrap_or_default(),
            res.get("band")
                .filter(|b| !b.is_null())
                .map(format_value)
                .unwrap_or_default(),
            res.get("hasData")
                .and_then(Value::as_bool)
                .unwrap_or(false)
                .to_string(),
        ),
        None => (String::new(), String::new(), "false".to_string()),
    };
    let _ = wtr.write_record([level, name, &percentage, &band, &has_data]);
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_value(item)]);
        }
    }
}
