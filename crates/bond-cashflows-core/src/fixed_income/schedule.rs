//! Payment schedule generation for fixed-coupon bullet bonds.
//!
//! Payment dates run forward from settlement in steps of `12 / frequency`
//! months and must land exactly on maturity. Every period pays the same
//! coupon; the face value is returned with the final coupon.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BondCashflowError;
use crate::types::{Money, Rate};
use crate::BondCashflowResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Payment frequencies (payments per year) that divide the year into whole months.
pub const VALID_FREQUENCIES: [u32; 6] = [1, 2, 3, 4, 6, 12];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One payment period of a bullet bond.
///
/// The schedule builder fills the first five fields. The discounting fields
/// stay `None` until the schedule is passed through
/// [`add_present_value`](super::present_value::add_present_value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashflowRecord {
    /// 1-based period number
    pub period: u32,
    pub payment_date: NaiveDate,
    /// Coupon paid this period: face * coupon_rate / frequency
    pub interest: Money,
    /// Face value on the final period, zero otherwise
    pub principal: Money,
    pub total_cash_flow: Money,
    /// (1 + yield / frequency) ^ -period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_factor: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present_value: Option<Money>,
    /// Running sum of present values up to and including this period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cumulative_present_value: Option<Money>,
}

impl CashflowRecord {
    /// Serialized field names paired with their report column headers, in
    /// report order.
    pub const COLUMNS: [(&'static str, &'static str); 8] = [
        ("period", "Period"),
        ("payment_date", "PaymentDate"),
        ("interest", "Interest"),
        ("principal", "Principal"),
        ("total_cash_flow", "TotalCashFlow"),
        ("discount_factor", "DiscountFactor"),
        ("present_value", "PVCashFlow"),
        ("cumulative_present_value", "CumPVCashFlow"),
    ];

    /// Whether the discounting fields have been populated.
    pub fn is_discounted(&self) -> bool {
        self.discount_factor.is_some()
            && self.present_value.is_some()
            && self.cumulative_present_value.is_some()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Months between payments for a validated payment frequency.
pub fn months_per_period(frequency: u32) -> BondCashflowResult<u32> {
    if !VALID_FREQUENCIES.contains(&frequency) {
        return Err(BondCashflowError::InvalidFrequency { frequency });
    }
    Ok(12 / frequency)
}

/// Build the cash-flow schedule of a bullet bond.
///
/// Produces one record per payment date from the first date after settlement
/// through maturity. Maturity must sit on the payment cycle anchored at
/// settlement; a misaligned maturity is rejected rather than producing a stub
/// period.
pub fn build_cashflows(
    settlement: NaiveDate,
    maturity: NaiveDate,
    face: Money,
    coupon_rate: Rate,
    frequency: u32,
) -> BondCashflowResult<Vec<CashflowRecord>> {
    let step_months = months_per_period(frequency)?;
    validate_terms(settlement, maturity, face, coupon_rate)?;

    let payment_dates = generate_payment_dates(settlement, maturity, step_months)?;
    let num_periods = payment_dates.len();
    let interest = face
        .checked_mul(coupon_rate)
        .and_then(|annual| annual.checked_div(Decimal::from(frequency)))
        .ok_or_else(|| BondCashflowError::NumericOverflow {
            context: format!("coupon of {coupon_rate} on face value {face}"),
        })?;

    let records = payment_dates
        .into_iter()
        .enumerate()
        .map(|(i, payment_date)| {
            let period = i as u32 + 1;
            let principal = if i + 1 == num_periods {
                face
            } else {
                Decimal::ZERO
            };
            let total_cash_flow = interest.checked_add(principal).ok_or_else(|| {
                BondCashflowError::NumericOverflow {
                    context: format!("total cash flow at period {period}"),
                }
            })?;
            Ok(CashflowRecord {
                period,
                payment_date,
                interest,
                principal,
                total_cash_flow,
                discount_factor: None,
                present_value: None,
                cumulative_present_value: None,
            })
        })
        .collect::<BondCashflowResult<Vec<CashflowRecord>>>()?;

    tracing::debug!(
        %settlement,
        %maturity,
        frequency,
        periods = records.len(),
        "built bullet bond schedule"
    );

    Ok(records)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_terms(
    settlement: NaiveDate,
    maturity: NaiveDate,
    face: Money,
    coupon_rate: Rate,
) -> BondCashflowResult<()> {
    if face <= Decimal::ZERO {
        return Err(BondCashflowError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if coupon_rate < Decimal::ZERO {
        return Err(BondCashflowError::InvalidInput {
            field: "coupon_rate".into(),
            reason: "Coupon rate cannot be negative".into(),
        });
    }
    if maturity <= settlement {
        return Err(BondCashflowError::InvalidDateRange {
            settlement,
            maturity,
            reason: "Maturity date must be after settlement date".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Payment dates
// ---------------------------------------------------------------------------

/// Dates `settlement + k * step_months` for k = 1, 2, ... up to maturity.
///
/// Each date is offset from settlement directly so a month-end clamp
/// (Jan 31 -> Feb 28) does not carry into later periods.
fn generate_payment_dates(
    settlement: NaiveDate,
    maturity: NaiveDate,
    step_months: u32,
) -> BondCashflowResult<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    let mut k: u32 = 1;

    loop {
        let offset = k.checked_mul(step_months).ok_or_else(|| {
            BondCashflowError::DateError(format!("payment {k} overflows the month offset"))
        })?;
        let date = settlement
            .checked_add_months(Months::new(offset))
            .ok_or_else(|| {
                BondCashflowError::DateError(format!(
                    "{settlement} + {offset} months is outside the supported calendar"
                ))
            })?;

        if date < maturity {
            dates.push(date);
            k += 1;
            continue;
        }

        if date == maturity {
            dates.push(date);
            return Ok(dates);
        }

        let previous = dates.last().copied().unwrap_or(settlement);
        return Err(BondCashflowError::InvalidDateRange {
            settlement,
            maturity,
            reason: format!(
                "Maturity is not on the {step_months}-month payment cycle from settlement \
                 (falls between {previous} and {date}); stub periods are not supported"
            ),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
