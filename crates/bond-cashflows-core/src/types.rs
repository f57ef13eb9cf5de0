use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BondCashflowError;
use crate::BondCashflowResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(s: &str) -> BondCashflowResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| BondCashflowError::DateError(format!("'{s}' is not a YYYY-MM-DD date: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2025-01-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_date_trims_whitespace() {
        let date = parse_iso_date(" 2035-01-01\n").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2035, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_date_rejects_bad_input() {
        for bad in ["2025-13-01", "2025-02-30", "01/01/2025", ""] {
            let err = parse_iso_date(bad).unwrap_err();
            assert!(
                matches!(err, BondCashflowError::DateError(_)),
                "Expected DateError for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_with_metadata_echoes_assumptions() {
        #[derive(Serialize)]
        struct Params {
            face: Money,
        }
        let out = with_metadata(
            "test",
            &Params {
                face: Decimal::ONE_HUNDRED,
            },
            vec!["note".into()],
            7,
            42u32,
        );
        assert_eq!(out.result, 42);
        assert_eq!(out.assumptions["face"], "100");
        assert_eq!(out.warnings, vec!["note".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
