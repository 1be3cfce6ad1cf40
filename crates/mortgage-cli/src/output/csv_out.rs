use serde_json::Value;
use std::io;

use super::{format_value, present_columns, row_set};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, value) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .and_then(Value::as_object);

    match result {
        Some(result) => {
            if let Some((columns, rows)) = row_set(result) {
                // One line per row, keyed by field name so the file re-imports cleanly
                let columns = present_columns(columns, rows);
                let mut header: Vec<&str> = columns.iter().map(|(key, _)| *key).collect();
                if rows.iter().any(|r| r.get("is_terminal").is_some()) {
                    header.push("is_terminal");
                }
                wtr.write_record(&header)?;
                for row in rows {
                    let record: Vec<String> = header
                        .iter()
                        .map(|h| row.get(*h).map(format_value).unwrap_or_default())
                        .collect();
                    wtr.write_record(&record)?;
                }
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in result {
                    wtr.write_record([key.as_str(), &format_value(val)])?;
                }
            }
        }
        None => wtr.write_record([format_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv(&mut wtr, value).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_annual_rows_csv() {
        let v = json!({"result": {"rows": [
            {"year": 1, "interest": "9546.55", "is_terminal": false},
            {"year": 2, "interest": "0.00", "is_terminal": true}
        ]}});
        let text = render(&v);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("year,interest,is_terminal"));
        assert_eq!(lines.next(), Some("1,9546.55,false"));
        assert_eq!(lines.next(), Some("2,0.00,true"));
    }

    #[test]
    fn test_monthly_rows_csv_has_no_terminal_column() {
        let v = json!({"result": {"months": [
            {"month": 1, "payment": "959.29", "balance": "159840.71"}
        ]}});
        let text = render(&v);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("month,payment,balance"));
        assert_eq!(lines.next(), Some("1,959.29,159840.71"));
    }

    #[test]
    fn test_summary_csv() {
        let v = json!({"result": {"monthly_payment": "959.29"}});
        let text = render(&v);
        assert_eq!(text, "field,value\nmonthly_payment,959.29\n");
    }
}
