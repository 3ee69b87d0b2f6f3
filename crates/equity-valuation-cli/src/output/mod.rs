pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` of a computation envelope, or the value itself when it is
/// not wrapped.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into dotted keys. Arrays of objects are left out
/// and returned separately under their dotted path.
pub(crate) fn flatten(value: &Value) -> (Vec<(String, Value)>, Vec<(String, Vec<Value>)>) {
    let mut fields = Vec::new();
    let mut tables = Vec::new();
    if let Value::Object(map) = value {
        flatten_into("", map, &mut fields, &mut tables);
    }
    (fields, tables)
}

fn flatten_into(
    prefix: &str,
    map: &Map<String, Value>,
    fields: &mut Vec<(String, Value)>,
    tables: &mut Vec<(String, Vec<Value>)>,
) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&path, inner, fields, tables),
            Value::Array(items) if items.first().is_some_and(Value::is_object) => {
                tables.push((path, items.clone()));
            }
            other => fields.push((path, other.clone())),
        }
    }
}

/// Render a scalar (or a short array of scalars) as a single cell.
pub(crate) fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_of_unwraps_envelope() {
        let v = json!({"result": {"value_per_share": "55.56"}, "warnings": []});
        assert_eq!(result_of(&v), &json!({"value_per_share": "55.56"}));
        let bare = json!([1, 2]);
        assert_eq!(result_of(&bare), &bare);
    }

    #[test]
    fn test_flatten_dotted_keys() {
        let v = json!({
            "ddm_value_per_share": {"status": "valued", "value_per_share": "55.56"},
            "spread": "0.045"
        });
        let (fields, tables) = flatten(&v);
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"ddm_value_per_share.status"));
        assert!(keys.contains(&"ddm_value_per_share.value_per_share"));
        assert!(keys.contains(&"spread"));
        assert!(tables.is_empty());
    }

    #[test]
    fn test_flatten_separates_row_arrays() {
        let v = json!({
            "table": {
                "method": "Straight-Line",
                "rows": [{"year": 1}, {"year": 2}],
                "amounts": ["1", "2"]
            }
        });
        let (fields, tables) = flatten(&v);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].0, "table.rows");
        assert_eq!(tables[0].1.len(), 2);
        assert!(fields.iter().any(|(k, _)| k == "table.amounts"));
    }

    #[test]
    fn test_cell_formats() {
        assert_eq!(cell(&json!("x")), "x");
        assert_eq!(cell(&json!(null)), "");
        assert_eq!(cell(&json!(["1", "2"])), "1, 2");
        assert_eq!(cell(&json!(true)), "true");
    }
}
