use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use bond_cashflows_core::fixed_income::{self, BondTerms, BulletBondInput};
use bond_cashflows_core::parse_iso_date;

use crate::input;

/// Bond terms shared by every command
#[derive(Args)]
pub struct BondTermsArgs {
    /// Settlement date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub settlement: Option<NaiveDate>,

    /// Maturity date (YYYY-MM-DD), on the payment cycle from settlement
    #[arg(long, value_parser = parse_date)]
    pub maturity: Option<NaiveDate>,

    /// Face value
    #[arg(long, default_value = "100")]
    pub face: Decimal,

    /// Annual coupon rate (e.g. 0.05 for 5%)
    #[arg(long)]
    pub coupon_rate: Option<Decimal>,

    /// Payments per year: 1, 2, 3, 4, 6 or 12
    #[arg(long, default_value = "2")]
    pub frequency: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the cash-flow schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub terms: BondTermsArgs,
}

/// Arguments for bullet bond pricing
#[derive(Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub terms: BondTermsArgs,

    /// Annual yield, compounded at the payment frequency (e.g. 0.035 for 3.5%)
    #[arg(long, alias = "yield", allow_hyphen_values = true)]
    pub yield_rate: Option<Decimal>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: BondTerms = match input::load_json(args.terms.input.as_deref())? {
        Some(terms) => terms,
        None => terms_from_flags(&args.terms)?,
    };
    let result = fixed_income::schedule_bullet_bond(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_price(args: PriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pricing_input: BulletBondInput = match input::load_json(args.terms.input.as_deref())? {
        Some(parsed) => parsed,
        None => pricing_input_from_flags(&args)?,
    };
    let result = fixed_income::price_bullet_bond(&pricing_input)?;
    Ok(serde_json::to_value(result)?)
}

fn terms_from_flags(args: &BondTermsArgs) -> Result<BondTerms, Box<dyn std::error::Error>> {
    Ok(BondTerms {
        settlement_date: args
            .settlement
            .ok_or("--settlement is required (or provide --input)")?,
        maturity_date: args
            .maturity
            .ok_or("--maturity is required (or provide --input)")?,
        face_value: args.face,
        coupon_rate: args
            .coupon_rate
            .ok_or("--coupon-rate is required (or provide --input)")?,
        frequency: args.frequency,
    })
}

fn pricing_input_from_flags(
    args: &PriceArgs,
) -> Result<BulletBondInput, Box<dyn std::error::Error>> {
    Ok(BulletBondInput {
        terms: terms_from_flags(&args.terms)?,
        yield_rate: args
            .yield_rate
            .ok_or("--yield-rate is required (or provide --input)")?,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_iso_date(s).map_err(|e| e.to_string())
}
