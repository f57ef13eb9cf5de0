pub mod bullet;
pub mod present_value;
pub mod schedule;

pub use bullet::{
    price_bullet_bond, schedule_bullet_bond, BondTerms, BulletBondInput, BulletBondOutput,
    CashflowScheduleOutput,
};
pub use present_value::{add_present_value, total_present_value};
pub use schedule::{build_cashflows, months_per_period, CashflowRecord, VALID_FREQUENCIES};
