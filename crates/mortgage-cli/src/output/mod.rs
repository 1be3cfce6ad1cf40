pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Row arrays a result may carry, with their display column order.
const ROW_SETS: &[(&str, &[(&str, &str)])] = &[
    (
        "rows",
        &[
            ("year", "Year"),
            ("interest", "Interest"),
            ("principal", "Principal"),
            ("expense", "Expense"),
            ("rent", "Rent"),
            ("profit", "Profit"),
            ("profit_pct", "Profit %"),
            ("cash_flow", "Cash Flow"),
            ("profit_with_equity", "Profit w/ Equity"),
            ("profit_with_equity_pct", "PWEq %"),
            ("profit_with_real_equity_pct", "PWRealEq %"),
        ],
    ),
    (
        "months",
        &[
            ("month", "Month"),
            ("date", "Date"),
            ("payment", "Payment"),
            ("principal", "Principal"),
            ("interest", "Interest"),
            ("balance", "Balance"),
        ],
    ),
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The first row array in `result` together with its columns.
fn row_set<'a>(
    result: &'a Map<String, Value>,
) -> Option<(&'static [(&'static str, &'static str)], &'a [Value])> {
    ROW_SETS.iter().find_map(|(key, columns)| match result.get(*key) {
        Some(Value::Array(rows)) => Some((*columns, rows.as_slice())),
        _ => None,
    })
}

/// Columns that at least one row actually carries.
fn present_columns(
    columns: &'static [(&'static str, &'static str)],
    rows: &[Value],
) -> Vec<(&'static str, &'static str)> {
    columns
        .iter()
        .copied()
        .filter(|(key, _)| rows.iter().any(|r| r.get(*key).is_some()))
        .collect()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
