pub mod csv_out;
pub mod minimal;
pub mod table;

use bond_cashflows_core::fixed_income::CashflowRecord;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, round: Option<u32>, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value, round),
        OutputFormat::Csv => csv_out::print_csv(value, round),
        OutputFormat::Minimal => minimal::print_minimal(value, round),
    }
}

/// Cash-flow rows of a result envelope under the report column headers.
///
/// Columns absent from the first row (the discounting columns of an
/// undiscounted schedule) are left out.
pub(crate) fn cashflow_table(
    value: &Value,
    round: Option<u32>,
) -> Option<(Vec<&'static str>, Vec<Vec<String>>)> {
    let rows = value.get("result")?.get("cashflows")?.as_array()?;
    let first = rows.first()?;

    let columns: Vec<(&'static str, &'static str)> = CashflowRecord::COLUMNS
        .iter()
        .copied()
        .filter(|(key, _)| first.get(key).is_some())
        .collect();

    let headers = columns.iter().map(|(_, header)| *header).collect();
    let body = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|(key, _)| {
                    row.get(key)
                        .map(|v| format_value(v, round))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Some((headers, body))
}

/// Scalar fields of the result object, everything except the cash-flow rows.
pub(crate) fn summary_fields(value: &Value, round: Option<u32>) -> Vec<(String, String)> {
    let result = value.get("result").unwrap_or(value);
    match result {
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| key.as_str() != "cashflows")
            .map(|(key, val)| (key.clone(), format_value(val, round)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Render a JSON value as a cell, rounding decimal numbers when asked.
pub(crate) fn format_value(value: &Value, round: Option<u32>) -> String {
    match value {
        Value::String(s) => round_decimal(s, round).unwrap_or_else(|| s.clone()),
        Value::Number(n) => {
            let s = n.to_string();
            round_decimal(&s, round).unwrap_or(s)
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| format_value(v, round))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn round_decimal(s: &str, round: Option<u32>) -> Option<String> {
    let dp = round?;
    let d: Decimal = s.parse().ok()?;
    Some(d.round_dp(dp).to_string())
}
