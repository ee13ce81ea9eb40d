//! Researcher model.
//!
//! A researcher's salary and contracted hours are recorded already pro-rated
//! for part-time employment, so the calculator never scales them again.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Weeks per year used to convert weekly contracted hours to monthly hours.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Months per year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// A member of staff whose time is charged to grants.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::models::Researcher;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let researcher = Researcher {
///     id: "researcher-001".to_string(),
///     name: "Dr Sarah Chen".to_string(),
///     email: "s.chen@university.ac.uk".to_string(),
///     department: "Physics".to_string(),
///     contracted_hours_weekly: Decimal::from(35),
///     employment_fraction: Decimal::ONE,
///     annual_salary: Decimal::from(52_000),
///     salary_effective_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
///     institution_id: "inst-001".to_string(),
/// };
/// assert_eq!(researcher.contracted_monthly_hours().round_dp(2), Decimal::new(15167, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Researcher {
    /// Unique identifier for the researcher.
    pub id: String,
    /// Display name, used in grant-total workings.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Department the researcher belongs to.
    #[serde(default)]
    pub department: String,
    /// Contracted hours per week (already pro-rated for part-time staff).
    pub contracted_hours_weekly: Decimal,
    /// Fraction of a full-time role, between 0 and 1.
    pub employment_fraction: Decimal,
    /// Annual salary in pounds (already pro-rated for part-time staff).
    pub annual_salary: Decimal,
    /// Date from which `annual_salary` applies.
    pub salary_effective_date: NaiveDate,
    /// Owning institution.
    #[serde(default)]
    pub institution_id: String,
}

impl Researcher {
    /// Unrounded contracted hours per month: weekly hours × 52 ÷ 12, or
    /// `None` when the weekly figure is too large to convert.
    pub fn checked_contracted_monthly_hours(&self) -> Option<Decimal> {
        self.contracted_hours_weekly
            .checked_mul(Decimal::from(WEEKS_PER_YEAR))?
            .checked_div(Decimal::from(MONTHS_PER_YEAR))
    }

    /// Unrounded contracted hours per month: weekly hours × 52 ÷ 12.
    ///
    /// Weekly hours too large to convert count as no contracted hours.
    pub fn contracted_monthly_hours(&self) -> Decimal {
        self.checked_contracted_monthly_hours()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the researcher is employed at less than 1.0 FTE.
    pub fn is_part_time(&self) -> bool {
        self.employment_fraction < Decimal::ONE
    }
}
