use serde_json::Value;
use std::io::{self, Write};

use super::{cell, flatten, result_of};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV write error: {e}");
    }
}

/// Record arrays (projection rows, comparisons, schedules) are written one
/// record per line. Anything else is written as two `field,value` columns.
pub(crate) fn write_csv<W: Write>(writer: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let result = result_of(value);

    match result {
        Value::Array(arr) => write_records(&mut wtr, arr)?,
        _ => {
            let (fields, tables) = flatten(result);
            match tables.first() {
                Some((_, rows)) => write_records(&mut wtr, rows)?,
                None => {
                    wtr.write_record(["field", "value"])?;
                    for (key, val) in &fields {
                        wtr.write_record([key.as_str(), &cell(val)])?;
                    }
                }
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_records<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([cell(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for item in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(*h).map(cell).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_scalar_result_is_two_columns() {
        let out = render(&json!({"result": {"value_per_share": "55.56"}}));
        assert_eq!(out, "field,value\nvalue_per_share,55.56\n");
    }

    #[test]
    fn test_projection_rows_written_as_records() {
        let out = render(&json!({
            "result": {
                "table": {"method": "Straight-Line", "rows": [
                    {"year": 1, "eps": "2.15"},
                    {"year": 2, "eps": "2.15"}
                ]},
                "summary": {"mode": "average-based"}
            }
        }));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        let mut header: Vec<&str> = lines[0].split(',').collect();
        header.sort_unstable();
        assert_eq!(header, vec!["eps", "year"]);
        assert!(lines[1].contains("2.15"));
    }

    #[test]
    fn test_top_level_array() {
        let out = render(&json!([{"name": "a", "total": "1"}]));
        assert_eq!(out, "name,total\na,1\n");
    }
}
