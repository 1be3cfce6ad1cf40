use serde_json::Value;

use super::format_value;

/// Fields that answer "what does this cost me", most useful first.
const PRIORITY_KEYS: &[&str] = &["monthly_payment", "total_payout", "total_paid", "total_interest"];

/// Print just the headline number of the output.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result else {
        return format_value(result);
    };

    if let Some(val) = PRIORITY_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|val| !val.is_null())
    {
        return format_value(val);
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_value(val)),
        None => String::new(),
    }
}
