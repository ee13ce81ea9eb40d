//! UKRI salary cost calculation.
//!
//! Methodology:
//! 1. Contracted monthly hours = contracted weekly hours × 52 ÷ 12
//! 2. Effort percentage = project hours for the month ÷ contracted monthly hours
//! 3. Monthly salary = annual salary ÷ 12
//! 4. Salary cost charged to grant = effort percentage × monthly salary
//! 5. Claimable cost = salary cost × fEC rate (skipped if the funder has none)
//!
//! Effort is measured against contracted hours, not hours actually worked
//! (apportionment). Part-time contracted hours and salary arrive already
//! pro-rated, so no further scaling is applied.
//!
//! A step whose arithmetic would overflow yields zero and the result carries
//! [`OVERFLOW_WARNING`].

use rust_decimal::Decimal;

use crate::models::{
    CalculationResult, CalculationWorking, FunderProfile, Grant, Researcher, TimesheetPeriod,
    MONTHS_PER_YEAR, WEEKS_PER_YEAR,
};

use super::rounding::{
    format_gbp, format_gbp_plain, format_number, format_percent, format_whole_percent, round2,
    round4,
};

/// Warning attached when the period has no hours for the grant.
pub const NO_HOURS_WARNING: &str =
    "No hours recorded for this grant in this period. Claimable cost is £0.";

/// Warning attached when the inputs are too large to calculate with.
pub const OVERFLOW_WARNING: &str =
    "Inputs are too large to calculate a salary cost. Affected figures are £0.";

/// Effort above funded FTE × this factor triggers an over-allocation warning.
pub const OVER_ALLOCATION_FACTOR: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

/// Unwraps a checked step, recording an overflow as zero.
fn or_zero(value: Option<Decimal>, overflowed: &mut bool) -> Decimal {
    value.unwrap_or_else(|| {
        *overflowed = true;
        Decimal::ZERO
    })
}

/// The records a single salary cost calculation reads.
#[derive(Debug, Clone, Copy)]
pub struct CalculationInput<'a> {
    /// The month being claimed.
    pub period: &'a TimesheetPeriod,
    /// Whose time is being charged.
    pub researcher: &'a Researcher,
    /// The grant being charged.
    pub grant: &'a Grant,
    /// The grant's funder methodology.
    pub funder_profile: &'a FunderProfile,
}

/// Calculates the claimable salary cost for one researcher, grant and month.
///
/// Each step's rounded value is the operand displayed in the next step's
/// formula. Missing entries, zero hours and zero contracted hours all produce
/// a zero result rather than an error.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::calculation::{CalculationInput, calculate_salary_cost};
/// use ukri_rules_engine::models::*;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let researcher = Researcher {
///     id: "researcher-001".to_string(),
///     name: "Dr Sarah Chen".to_string(),
///     email: String::new(),
///     department: "Physics".to_string(),
///     contracted_hours_weekly: Decimal::from(35),
///     employment_fraction: Decimal::ONE,
///     annual_salary: Decimal::from(52_000),
///     salary_effective_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
///     institution_id: String::new(),
/// };
/// let grant = Grant {
///     id: "grant-001".to_string(),
///     funder_profile_id: "ukri".to_string(),
///     title: String::new(),
///     reference: "EP/T023456/1".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2027, 3, 31).unwrap(),
///     funded_fte: Decimal::new(4, 1),
///     total_staff_budget: Decimal::from(180_000),
///     principal_investigator_id: String::new(),
///     institution_id: String::new(),
/// };
/// let period = TimesheetPeriod {
///     id: "period-2025-10".to_string(),
///     researcher_id: "researcher-001".to_string(),
///     year: 2025,
///     month: 10,
///     status: TimesheetStatus::Draft,
///     submitted_at: None,
///     signed_at: None,
///     countersigned_at: None,
///     locked_at: None,
///     entries: vec![TimesheetEntry {
///         id: "entry-001".to_string(),
///         grant_id: "grant-001".to_string(),
///         hours: Decimal::from(14),
///         notes: None,
///     }],
///     non_grant_entries: vec![],
/// };
/// let profile = FunderProfile::ukri();
///
/// let result = calculate_salary_cost(&CalculationInput {
///     period: &period,
///     researcher: &researcher,
///     grant: &grant,
///     funder_profile: &profile,
/// });
/// assert_eq!(result.claimable_cost, Decimal::new(32000, 2));
/// ```
pub fn calculate_salary_cost(input: &CalculationInput<'_>) -> CalculationResult {
    let CalculationInput {
        period,
        researcher,
        grant,
        funder_profile,
    } = *input;

    let mut warnings = Vec::new();
    let mut workings = Vec::with_capacity(5);
    let mut overflowed = false;

    let project_hours = period.hours_for(&grant.id);
    if project_hours.is_zero() {
        warnings.push(NO_HOURS_WARNING.to_string());
    }

    // Step 1: contracted monthly hours
    let contracted_monthly_hours = or_zero(
        researcher.checked_contracted_monthly_hours(),
        &mut overflowed,
    );
    let rounded_monthly_hours = round2(contracted_monthly_hours);

    workings.push(CalculationWorking {
        step: "Calculate contracted monthly hours".to_string(),
        formula: format!(
            "{} hours/week × {} weeks ÷ {} months = {} hours/month",
            format_number(researcher.contracted_hours_weekly),
            WEEKS_PER_YEAR,
            MONTHS_PER_YEAR,
            format_number(rounded_monthly_hours)
        ),
        result: rounded_monthly_hours,
        notes: Some(
            "Uses contracted hours, not actual hours worked. This is the UKRI apportionment \
             methodology: effort is measured against contractual obligation, not total hours \
             physically worked."
                .to_string(),
        ),
    });

    // Step 2: effort percentage
    let effort = if contracted_monthly_hours > Decimal::ZERO {
        or_zero(
            project_hours.checked_div(contracted_monthly_hours),
            &mut overflowed,
        )
    } else {
        Decimal::ZERO
    };
    let rounded_effort = round4(effort);
    let effort_display = format_percent(rounded_effort);

    workings.push(CalculationWorking {
        step: "Calculate effort percentage".to_string(),
        formula: format!(
            "{} project hours ÷ {} contracted hours = {}%",
            format_number(project_hours),
            format_number(rounded_monthly_hours),
            effort_display
        ),
        result: rounded_effort,
        notes: None,
    });

    // Step 3: monthly salary
    let monthly_salary = researcher.annual_salary / Decimal::from(MONTHS_PER_YEAR);
    let rounded_monthly_salary = round2(monthly_salary);

    workings.push(CalculationWorking {
        step: "Calculate monthly salary".to_string(),
        formula: format!(
            "{} ÷ {} = {}",
            format_gbp_plain(researcher.annual_salary),
            MONTHS_PER_YEAR,
            format_gbp(rounded_monthly_salary)
        ),
        result: rounded_monthly_salary,
        notes: researcher.is_part_time().then(|| {
            format!(
                "Researcher is {} FTE. Salary is already pro-rated for part-time employment.",
                format_number(researcher.employment_fraction)
            )
        }),
    });

    // Step 4: salary cost charged to grant
    let salary_cost_charged = round2(or_zero(
        effort.checked_mul(monthly_salary),
        &mut overflowed,
    ));

    workings.push(CalculationWorking {
        step: "Calculate salary cost charged to grant".to_string(),
        formula: format!(
            "{}% × {} = {}",
            effort_display,
            format_gbp(rounded_monthly_salary),
            format_gbp(salary_cost_charged)
        ),
        result: salary_cost_charged,
        notes: None,
    });

    // Step 5: fEC rate
    let claimable_cost = match funder_profile.fec_rate {
        Some(fec_rate) => {
            let claimable = round2(or_zero(
                salary_cost_charged.checked_mul(fec_rate),
                &mut overflowed,
            ));
            let fec_percent = format_whole_percent(fec_rate);

            workings.push(CalculationWorking {
                step: format!("Apply fEC rate ({} {}%)", funder_profile.name, fec_percent),
                formula: format!(
                    "{} × {} = {}",
                    format_gbp(salary_cost_charged),
                    format_number(fec_rate),
                    format_gbp(claimable)
                ),
                result: claimable,
                notes: Some(format!(
                    "{} funds at {}% of full Economic Cost.",
                    funder_profile.name, fec_percent
                )),
            });
            claimable
        }
        None => {
            workings.push(CalculationWorking {
                step: "No fEC rate applicable".to_string(),
                formula: format!(
                    "Claimable cost = salary cost = {}",
                    format_gbp(salary_cost_charged)
                ),
                result: salary_cost_charged,
                notes: Some("This funder does not apply a fEC rate adjustment.".to_string()),
            });
            salary_cost_charged
        }
    };

    let over_allocated = grant
        .funded_fte
        .checked_mul(OVER_ALLOCATION_FACTOR)
        .is_some_and(|limit| effort > limit);
    if over_allocated {
        warnings.push(format!(
            "Effort this month ({}%) exceeds funded FTE ({}%) by more than 25%. Review for consistency.",
            effort_display,
            format_whole_percent(grant.funded_fte)
        ));
    }

    if overflowed {
        warnings.push(OVERFLOW_WARNING.to_string());
    }

    CalculationResult {
        grant_id: grant.id.clone(),
        researcher_id: researcher.id.clone(),
        period_year: period.year,
        period_month: period.month,
        project_hours,
        contracted_monthly_hours: rounded_monthly_hours,
        effort_percentage: rounded_effort,
        monthly_salary: rounded_monthly_salary,
        salary_cost_charged,
        fec_rate: funder_profile.fec_rate,
        claimable_cost,
        workings,
        warnings,
    }
}
