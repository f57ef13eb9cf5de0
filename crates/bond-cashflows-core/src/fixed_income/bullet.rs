//! Bullet bond analysis: schedule plus pricing at a flat yield, wrapped in
//! the standard computation envelope.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BondCashflowError;
use crate::fixed_income::present_value::{add_present_value, total_present_value};
use crate::fixed_income::schedule::{build_cashflows, CashflowRecord};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::BondCashflowResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Contractual terms of a fixed-coupon bullet bond.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondTerms {
    /// Settlement (valuation) date
    pub settlement_date: NaiveDate,
    /// Maturity date, on the payment cycle from settlement
    pub maturity_date: NaiveDate,
    /// Face value returned at maturity
    pub face_value: Money,
    /// Annual coupon rate as a decimal (e.g. 0.05 = 5%)
    pub coupon_rate: Rate,
    /// Payments per year: 1, 2, 3, 4, 6 or 12
    pub frequency: u32,
}

/// Input for pricing a bullet bond at a flat yield.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletBondInput {
    #[serde(flatten)]
    pub terms: BondTerms,
    /// Annual yield as a decimal, compounded at the payment frequency
    pub yield_rate: Rate,
}

/// Undiscounted schedule with summary totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowScheduleOutput {
    /// Coupon paid each period
    pub coupon_amount: Money,
    pub num_periods: u32,
    /// Sum of all coupons
    pub total_interest: Money,
    /// Sum of all coupons plus face value
    pub total_undiscounted_cash_flow: Money,
    pub cashflows: Vec<CashflowRecord>,
}

/// Priced schedule with summary analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletBondOutput {
    /// Sum of the present values of all cash flows
    pub price: Money,
    /// Price as a percentage of face value
    pub price_per_100: Decimal,
    /// Annual coupon / price
    pub current_yield: Rate,
    pub coupon_amount: Money,
    pub num_periods: u32,
    pub total_interest: Money,
    pub total_undiscounted_cash_flow: Money,
    /// Discounted schedule
    pub cashflows: Vec<CashflowRecord>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the cash-flow schedule of a bullet bond with summary totals.
pub fn schedule_bullet_bond(
    terms: &BondTerms,
) -> BondCashflowResult<ComputationOutput<CashflowScheduleOutput>> {
    let start = Instant::now();

    let cashflows = schedule_for(terms)?;
    let output = CashflowScheduleOutput {
        coupon_amount: coupon_amount(&cashflows),
        num_periods: cashflows.len() as u32,
        total_interest: checked_total(&cashflows, |r| r.interest, "total interest")?,
        total_undiscounted_cash_flow: checked_total(
            &cashflows,
            |r| r.total_cash_flow,
            "total undiscounted cash flow",
        )?,
        cashflows,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bullet bond schedule: level coupons at the payment frequency, face value at maturity",
        terms,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Build the schedule of a bullet bond, discount it at a flat yield, and
/// report the price with summary analytics.
pub fn price_bullet_bond(
    input: &BulletBondInput,
) -> BondCashflowResult<ComputationOutput<BulletBondOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let terms = &input.terms;

    let schedule = schedule_for(terms)?;
    let cashflows = add_present_value(schedule, input.yield_rate, terms.frequency)?;
    let price = total_present_value(&cashflows).unwrap_or(Decimal::ZERO);

    if input.yield_rate < Decimal::ZERO {
        warnings.push(format!(
            "Negative yield {}: price exceeds undiscounted cash flows",
            input.yield_rate
        ));
    }
    if input.yield_rate / Decimal::from(terms.frequency) < dec!(-1) {
        warnings.push(
            "Per-period yield below -100%: discount factors alternate in sign".into(),
        );
    }

    let current_yield = if price > Decimal::ZERO {
        terms
            .face_value
            .checked_mul(terms.coupon_rate)
            .and_then(|annual_coupon| annual_coupon.checked_div(price))
            .ok_or_else(|| overflow("current yield"))?
    } else {
        warnings.push("Price is zero or negative; current yield undefined".into());
        Decimal::ZERO
    };
    let price_per_100 = price
        .checked_div(terms.face_value)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| overflow("price per 100 of face"))?;

    let output = BulletBondOutput {
        price,
        price_per_100,
        current_yield,
        coupon_amount: coupon_amount(&cashflows),
        num_periods: cashflows.len() as u32,
        total_interest: checked_total(&cashflows, |r| r.interest, "total interest")?,
        total_undiscounted_cash_flow: checked_total(
            &cashflows,
            |r| r.total_cash_flow,
            "total undiscounted cash flow",
        )?,
        cashflows,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bullet bond pricing: PV of level coupons and face value at a flat periodic yield",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn schedule_for(terms: &BondTerms) -> BondCashflowResult<Vec<CashflowRecord>> {
    build_cashflows(
        terms.settlement_date,
        terms.maturity_date,
        terms.face_value,
        terms.coupon_rate,
        terms.frequency,
    )
}

/// Level coupon of a schedule; every record carries the same interest.
fn coupon_amount(cashflows: &[CashflowRecord]) -> Money {
    cashflows.first().map_or(Decimal::ZERO, |r| r.interest)
}

fn checked_total(
    cashflows: &[CashflowRecord],
    field: impl Fn(&CashflowRecord) -> Money,
    context: &str,
) -> BondCashflowResult<Money> {
    cashflows
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(field(r)))
        .ok_or_else(|| overflow(context))
}

fn overflow(context: &str) -> BondCashflowError {
    BondCashflowError::NumericOverflow {
        context: context.into(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
