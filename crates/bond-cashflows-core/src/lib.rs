pub mod error;
pub mod fixed_income;
pub mod types;

pub use error::BondCashflowError;
pub use types::*;

/// Standard result type for all bond cash-flow operations
pub type BondCashflowResult<T> = Result<T, BondCashflowError>;
