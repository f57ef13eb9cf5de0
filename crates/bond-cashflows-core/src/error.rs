use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BondCashflowError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid date range: settlement {settlement}, maturity {maturity}: {reason}")]
    InvalidDateRange {
        settlement: NaiveDate,
        maturity: NaiveDate,
        reason: String,
    },

    #[error("Invalid payment frequency {frequency}: must be one of 1, 2, 3, 4, 6 or 12 per year")]
    InvalidFrequency { frequency: u32 },

    #[error("Invalid yield {yield_rate} at frequency {frequency}: per-period yield of -100% has no discount factor")]
    InvalidYield { yield_rate: Decimal, frequency: u32 },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BondCashflowError {
    fn from(e: serde_json::Error) -> Self {
        BondCashflowError::SerializationError(e.to_string())
    }
}
