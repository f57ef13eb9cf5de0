use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cashflow_table, summary_fields};

/// Print the cash-flow rows as a grid, then the summary fields, warnings and
/// methodology of the envelope.
pub fn print_table(value: &Value, round: Option<u32>) {
    if let Some((headers, rows)) = cashflow_table(value, round) {
        let mut builder = Builder::default();
        builder.push_record(headers);
        for row in rows {
            builder.push_record(row);
        }
        println!("{}", Table::from(builder));
    }

    let fields = summary_fields(value, round);
    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in fields {
            builder.push_record([key, val]);
        }
        println!("{}", Table::from(builder));
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
