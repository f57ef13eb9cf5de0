use serde_json::Value;

use super::format_value;

/// Print just the key answer: the price for a priced bond, the number of
/// periods for a bare schedule, otherwise the first result field.
pub fn print_minimal(value: &Value, round: Option<u32>) {
    println!("{}", minimal_answer(value, round));
}

fn minimal_answer(value: &Value, round: Option<u32>) -> String {
    let result = value.get("result").unwrap_or(value);

    if let Value::Object(map) = result {
        for key in ["price", "num_periods"] {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return format_value(val, round);
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_value(val, round));
        }
    }

    format_value(result, round)
}
