//! Calculation logic for the UKRI rules engine.
//!
//! This module contains the salary cost calculation for one researcher, grant
//! and month, the grant total aggregation across researchers and months, and
//! the burn rate projection over a grant's lifetime. Every calculation returns
//! a working trail alongside its figures.

mod burn_rate;
mod grant_total;
mod rounding;
mod salary_cost;

pub use burn_rate::{BURN_RATE_TOLERANCE, calculate_burn_rate, calculate_burn_rate_now};
pub use grant_total::calculate_grant_total;
pub use rounding::{
    format_gbp, format_gbp_plain, format_number, format_percent, format_whole_percent, round2,
    round3, round4, saturating_div, saturating_sum,
};
pub use salary_cost::{
    CalculationInput, NO_HOURS_WARNING, OVER_ALLOCATION_FACTOR, OVERFLOW_WARNING,
    calculate_salary_cost,
};
