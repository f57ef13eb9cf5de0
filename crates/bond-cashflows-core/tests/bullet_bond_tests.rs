use bond_cashflows_core::fixed_income::{
    add_present_value, build_cashflows, price_bullet_bond, total_present_value, BondTerms,
    BulletBondInput, CashflowRecord,
};
use bond_cashflows_core::{parse_iso_date, BondCashflowError};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ===========================================================================
// Schedule properties
// ===========================================================================

#[test]
fn test_reference_schedule_from_iso_strings() {
    let settlement = parse_iso_date("2025-01-01").unwrap();
    let maturity = parse_iso_date("2035-01-01").unwrap();
    let records = build_cashflows(settlement, maturity, dec!(100000), dec!(0.05), 2).unwrap();

    assert_eq!(records.len(), 20);
    assert_eq!(
        records.iter().map(|r| r.period).collect::<Vec<_>>(),
        (1..=20).collect::<Vec<u32>>()
    );
    assert_eq!(records.last().unwrap().payment_date, maturity);
    assert_eq!(records.last().unwrap().total_cash_flow, dec!(102500));
}

#[test]
fn test_exactly_one_principal_payment_on_last_record() {
    let cases = [
        (ymd(2025, 1, 1), ymd(2035, 1, 1), 2),
        (ymd(2024, 6, 30), ymd(2027, 6, 30), 4),
        (ymd(2023, 3, 31), ymd(2025, 3, 31), 12),
        (ymd(2025, 5, 10), ymd(2030, 5, 10), 1),
    ];
    for (settlement, maturity, freq) in cases {
        let face = dec!(250000);
        let records = build_cashflows(settlement, maturity, face, dec!(0.0425), freq).unwrap();
        let with_principal: Vec<&CashflowRecord> =
            records.iter().filter(|r| !r.principal.is_zero()).collect();

        assert_eq!(with_principal.len(), 1);
        assert_eq!(with_principal[0].period as usize, records.len());
        assert_eq!(with_principal[0].principal, face);

        let interest = face * dec!(0.0425) / Decimal::from(freq);
        for r in &records[..records.len() - 1] {
            assert_eq!(r.total_cash_flow, interest);
        }
        assert_eq!(records.last().unwrap().total_cash_flow, interest + face);
    }
}

#[test]
fn test_payment_dates_step_by_whole_months() {
    let records =
        build_cashflows(ymd(2025, 1, 15), ymd(2028, 1, 15), dec!(100), dec!(0.05), 4).unwrap();
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.payment_date).collect();
    assert_eq!(
        &dates[..5],
        &[
            ymd(2025, 4, 15),
            ymd(2025, 7, 15),
            ymd(2025, 10, 15),
            ymd(2026, 1, 15),
            ymd(2026, 4, 15),
        ]
    );
}

// ===========================================================================
// Discounting properties
// ===========================================================================

#[test]
fn test_sum_of_pvs_equals_final_cumulative_pv() {
    for yield_rate in [dec!(0.0), dec!(0.01), dec!(0.035), dec!(0.12), dec!(-0.02)] {
        let records =
            build_cashflows(ymd(2025, 1, 1), ymd(2035, 1, 1), dec!(100000), dec!(0.05), 2)
                .unwrap();
        let records = add_present_value(records, yield_rate, 2).unwrap();
        let sum: Decimal = records.iter().map(|r| r.present_value.unwrap()).sum();
        assert_eq!(
            records.last().unwrap().cumulative_present_value,
            Some(sum),
            "yield {yield_rate}"
        );
        assert_eq!(total_present_value(&records), Some(sum));
    }
}

#[test]
fn test_annotation_preserves_schedule_fields() {
    let schedule =
        build_cashflows(ymd(2025, 1, 1), ymd(2030, 1, 1), dec!(1000), dec!(0.06), 2).unwrap();
    let discounted = add_present_value(schedule.clone(), dec!(0.04), 2).unwrap();

    assert_eq!(schedule.len(), discounted.len());
    for (before, after) in schedule.iter().zip(&discounted) {
        assert_eq!(before.period, after.period);
        assert_eq!(before.payment_date, after.payment_date);
        assert_eq!(before.interest, after.interest);
        assert_eq!(before.principal, after.principal);
        assert_eq!(before.total_cash_flow, after.total_cash_flow);
        assert!(after.is_discounted());
    }
}

#[test]
fn test_higher_yield_lowers_price() {
    let price_at = |y: Decimal| {
        let records =
            build_cashflows(ymd(2025, 1, 1), ymd(2035, 1, 1), dec!(100000), dec!(0.05), 2)
                .unwrap();
        total_present_value(&add_present_value(records, y, 2).unwrap()).unwrap()
    };
    let low = price_at(dec!(0.03));
    let mid = price_at(dec!(0.05));
    let high = price_at(dec!(0.07));
    assert!(low > mid && mid > high, "{low} > {mid} > {high}");
}

// ===========================================================================
// End-to-end pricing
// ===========================================================================

#[test]
fn test_reference_bond_end_to_end() {
    let input = BulletBondInput {
        terms: BondTerms {
            settlement_date: ymd(2025, 1, 1),
            maturity_date: ymd(2035, 1, 1),
            face_value: dec!(100000),
            coupon_rate: dec!(0.05),
            frequency: 2,
        },
        yield_rate: dec!(0.035),
    };
    let out = price_bullet_bond(&input).unwrap();
    let result = &out.result;

    assert_eq!(result.num_periods, 20);
    assert_eq!(result.coupon_amount, dec!(2500));
    assert!(
        (result.price - dec!(112564.66)).abs() < dec!(0.01),
        "Expected price ~112564.66, got {}",
        result.price
    );
    assert!((result.price_per_100 - dec!(112.56466)).abs() < dec!(0.0001));
}

#[test]
fn test_zero_coupon_end_to_end() {
    let input = BulletBondInput {
        terms: BondTerms {
            settlement_date: ymd(2025, 1, 1),
            maturity_date: ymd(2030, 1, 1),
            face_value: dec!(1000),
            coupon_rate: Decimal::ZERO,
            frequency: 1,
        },
        yield_rate: dec!(0.05),
    };
    let out = price_bullet_bond(&input).unwrap();

    assert_eq!(out.result.total_interest, Decimal::ZERO);
    assert_eq!(out.result.current_yield, Decimal::ZERO);
    let nonzero: Vec<u32> = out
        .result
        .cashflows
        .iter()
        .filter(|r| !r.total_cash_flow.is_zero())
        .map(|r| r.period)
        .collect();
    assert_eq!(nonzero, vec![5]);

    // 1000 / 1.05^5 = 783.526...
    assert!((out.result.price - dec!(783.5262)).abs() < dec!(0.0001));
}

// ===========================================================================
// Errors
// ===========================================================================

#[test]
fn test_error_taxonomy() {
    let misaligned = build_cashflows(ymd(2025, 1, 1), ymd(2030, 2, 1), dec!(100), dec!(0.05), 2);
    assert!(matches!(
        misaligned,
        Err(BondCashflowError::InvalidDateRange { .. })
    ));

    let bad_freq = build_cashflows(ymd(2025, 1, 1), ymd(2030, 1, 1), dec!(100), dec!(0.05), 0);
    assert!(matches!(
        bad_freq,
        Err(BondCashflowError::InvalidFrequency { frequency: 0 })
    ));

    let schedule =
        build_cashflows(ymd(2025, 1, 1), ymd(2030, 1, 1), dec!(100), dec!(0.05), 4).unwrap();
    let bad_yield = add_present_value(schedule, dec!(-4), 4);
    assert!(matches!(
        bad_yield,
        Err(BondCashflowError::InvalidYield { .. })
    ));
}

#[test]
fn test_error_messages() {
    let err = build_cashflows(ymd(2025, 1, 1), ymd(2030, 1, 1), dec!(100), dec!(0.05), 5)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid payment frequency 5: must be one of 1, 2, 3, 4, 6 or 12 per year"
    );

    let err = build_cashflows(ymd(2025, 1, 1), ymd(2024, 1, 1), dec!(100), dec!(0.05), 2)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid date range: settlement 2025-01-01, maturity 2024-01-01: \
         Maturity date must be after settlement date"
    );
}
