use serde_json::Value;
use std::io::{self, Write};

use super::{cashflow_table, summary_fields};

/// Write output as CSV to stdout.
///
/// Envelopes with a cash-flow schedule print one row per period under the
/// report headers; anything else prints as `field,value` pairs.
pub fn print_csv(value: &Value, round: Option<u32>) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value, round) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: Write>(writer: W, value: &Value, round: Option<u32>) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if let Some((headers, rows)) = cashflow_table(value, round) {
        wtr.write_record(&headers)?;
        for row in rows {
            wtr.write_record(&row)?;
        }
    } else {
        wtr.write_record(["field", "value"])?;
        for (key, val) in summary_fields(value, round) {
            wtr.write_record([key, val])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value, round: Option<u32>) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value, round).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_schedule_rows() {
        let value = json!({
            "result": {
                "num_periods": 1,
                "cashflows": [{
                    "period": 1,
                    "payment_date": "2026-01-01",
                    "interest": "5",
                    "principal": "100",
                    "total_cash_flow": "105",
                    "discount_factor": "0.952380952",
                    "present_value": "100.0000",
                    "cumulative_present_value": "100.0000"
                }]
            }
        });
        let out = render(&value, Some(3));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "Period,PaymentDate,Interest,Principal,TotalCashFlow,DiscountFactor,PVCashFlow,CumPVCashFlow"
        );
        assert_eq!(lines[1], "1,2026-01-01,5,100,105,0.952,100.000,100.000");
    }

    #[test]
    fn test_field_value_fallback() {
        let out = render(&json!({"result": {"price": "99.5"}}), None);
        assert_eq!(out, "field,value\nprice,99.5\n");
    }
}
