use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, present_columns, row_set};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result(result, map),
            _ => print_fields(map),
        },
        _ => println!("{}", value),
    }
}

fn print_result(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    if let Some((columns, rows)) = row_set(result) {
        let columns = present_columns(columns, rows);
        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|(_, label)| *label));
        for row in rows {
            builder.push_record(columns.iter().map(|(key, _)| {
                let cell = row.get(*key).map(format_value).unwrap_or_default();
                if *key == "year" && row.get("is_terminal") == Some(&Value::Bool(true)) {
                    format!("{cell} (paid off)")
                } else {
                    cell
                }
            }));
        }
        println!("{}", Table::from(builder));
        println!();
    }

    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(_, v)| !v.is_array())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !scalars.is_empty() {
        print_fields(&scalars);
    }

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

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column table; nested objects expand to `section.field` rows.
fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut records = Vec::new();
    flatten("", map, &mut records);
    for (key, val) in records {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten(&name, inner, out),
            other => out.push((name, format_value(other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_sections() {
        let v = json!({"loan": {"interest": "6", "months": 360}, "rent": {"rent": "1500"}});
        let mut out = Vec::new();
        flatten("", v.as_object().unwrap(), &mut out);
        assert!(out.contains(&("loan.interest".to_string(), "6".to_string())));
        assert!(out.contains(&("loan.months".to_string(), "360".to_string())));
        assert!(out.contains(&("rent.rent".to_string(), "1500".to_string())));
    }
}
