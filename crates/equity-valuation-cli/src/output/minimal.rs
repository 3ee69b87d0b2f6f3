use serde_json::Value;

use super::{cell, flatten, result_of};

/// Print just the headline numbers: every per-share value and every summary
/// valuation, one `key: value` line each. Falls back to the first field.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{line}");
    }
}

pub(crate) fn minimal_lines(value: &Value) -> Vec<String> {
    let result = result_of(value);
    if !result.is_object() {
        return vec![cell(result)];
    }

    let (fields, tables) = flatten(result);
    let headline: Vec<String> = fields
        .iter()
        .filter(|(key, val)| {
            !val.is_null() && (key.ends_with("value_per_share") || key.ends_with("_valuation"))
        })
        .map(|(key, val)| format!("{key}: {}", cell(val)))
        .collect();
    if !headline.is_empty() {
        return headline;
    }

    match (fields.first(), tables.first()) {
        (Some((key, val)), _) => vec![format!("{key}: {}", cell(val))],
        (None, Some((key, rows))) => vec![format!("{key}: {} rows", rows.len())],
        (None, None) => Vec::new(),
    }
}
