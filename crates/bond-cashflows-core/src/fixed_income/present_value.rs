//! Discounting of a bullet bond schedule at a flat periodic yield.

use rust_decimal::Decimal;

use crate::error::BondCashflowError;
use crate::fixed_income::schedule::{months_per_period, CashflowRecord};
use crate::types::{Money, Rate};
use crate::BondCashflowResult;

/// Annotate each record with its discount factor, present value and
/// cumulative present value.
///
/// The per-period yield is `yield_rate / frequency`; the discount factor of
/// period `n` is `(1 + yield_rate / frequency) ^ -n`. Factors are built by
/// repeated division rather than `powd` so they stay exact to Decimal
/// precision. `frequency` should be the one the schedule was built with.
///
/// Fails with `InvalidYield` when the per-period yield is exactly -100%.
/// Nothing is returned on failure.
pub fn add_present_value(
    mut records: Vec<CashflowRecord>,
    yield_rate: Rate,
    frequency: u32,
) -> BondCashflowResult<Vec<CashflowRecord>> {
    months_per_period(frequency)?;

    let per_period_yield = yield_rate / Decimal::from(frequency);
    let growth = Decimal::ONE.checked_add(per_period_yield).ok_or_else(|| {
        BondCashflowError::NumericOverflow {
            context: format!("growth factor for per-period yield {per_period_yield}"),
        }
    })?;
    if growth.is_zero() {
        return Err(BondCashflowError::InvalidYield {
            yield_rate,
            frequency,
        });
    }
    if growth < Decimal::ZERO {
        tracing::warn!(
            %yield_rate,
            frequency,
            "per-period yield below -100%, discount factors alternate in sign"
        );
    }

    // (1 + y) ^ -discounted_periods
    let mut factor = Decimal::ONE;
    let mut discounted_periods: u32 = 0;
    let mut cumulative = Decimal::ZERO;

    for record in records.iter_mut() {
        if record.period < discounted_periods {
            factor = Decimal::ONE;
            discounted_periods = 0;
        }
        while discounted_periods < record.period {
            factor = factor
                .checked_div(growth)
                .ok_or_else(|| BondCashflowError::NumericOverflow {
                    context: format!(
                        "discount factor at period {} for per-period yield {per_period_yield}",
                        discounted_periods + 1
                    ),
                })?;
            discounted_periods += 1;
        }

        let present_value = record.total_cash_flow.checked_mul(factor).ok_or_else(|| {
            BondCashflowError::NumericOverflow {
                context: format!("present value at period {}", record.period),
            }
        })?;
        cumulative = cumulative.checked_add(present_value).ok_or_else(|| {
            BondCashflowError::NumericOverflow {
                context: format!("cumulative present value at period {}", record.period),
            }
        })?;

        record.discount_factor = Some(factor);
        record.present_value = Some(present_value);
        record.cumulative_present_value = Some(cumulative);
    }

    tracing::debug!(
        %yield_rate,
        frequency,
        periods = records.len(),
        price = %cumulative,
        "discounted bullet bond schedule"
    );

    Ok(records)
}

/// Sum of the present values of a discounted schedule (the bond price).
///
/// Returns `None` if any record has not been discounted. An empty schedule
/// prices at zero.
pub fn total_present_value(records: &[CashflowRecord]) -> Option<Money> {
    records.iter().map(|r| r.present_value).sum()
}
