//! Burn rate projection.
//!
//! Answers "at the current pace, will the grant spend its staff budget?" by
//! extrapolating the average monthly claim over the grant's full length.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::models::{BurnRateResult, BurnRateStatus, CalculationResult, CalculationWorking, Grant};

use super::rounding::{format_gbp, round2, saturating_sum};

/// Projected spend within this fraction of budget either way is on track.
pub const BURN_RATE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Whole calendar months from `from` to `to`, ignoring the day of month.
fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (i64::from(to.year()) - i64::from(from.year())) * 12 + i64::from(to.month())
        - i64::from(from.month())
}

/// Projects a grant's lifetime staff spend from the calculations so far.
///
/// `as_of` is the date the projection is made on. Months elapsed and total
/// grant months are both floored at 1.
///
/// # Example
///
/// ```
/// use ukri_rules_engine::calculation::calculate_burn_rate;
/// use ukri_rules_engine::models::{BurnRateStatus, Grant};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let grant = Grant {
///     id: "g-1".to_string(),
///     funder_profile_id: "ukri".to_string(),
///     title: String::new(),
///     reference: "EP/X000001/1".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2027, 12, 31).unwrap(),
///     funded_fte: Decimal::new(5, 1),
///     total_staff_budget: Decimal::from(120_000),
///     principal_investigator_id: String::new(),
///     institution_id: String::new(),
/// };
///
/// let result = calculate_burn_rate(&grant, &[], NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
/// assert_eq!(result.months_elapsed, 6);
/// assert_eq!(result.months_remaining, 29);
/// assert_eq!(result.burn_rate_status, BurnRateStatus::Underspending);
/// ```
pub fn calculate_burn_rate(
    grant: &Grant,
    calculation_results: &[CalculationResult],
    as_of: NaiveDate,
) -> BurnRateResult {
    let mut workings = Vec::with_capacity(4);

    let total_claimed_to_date = round2(saturating_sum(
        calculation_results.iter().map(|r| r.claimable_cost),
    ));

    let months_elapsed = months_between(grant.start_date, as_of).max(1);
    let total_grant_months = months_between(grant.start_date, grant.end_date).max(1);
    let months_remaining = (total_grant_months - months_elapsed).max(0);

    workings.push(CalculationWorking {
        step: "Total claimed to date".to_string(),
        formula: format!(
            "Sum of {} monthly calculation(s) = {}",
            calculation_results.len(),
            format_gbp(total_claimed_to_date)
        ),
        result: total_claimed_to_date,
        notes: None,
    });

    let average_monthly_burn = round2(total_claimed_to_date / Decimal::from(months_elapsed));

    workings.push(CalculationWorking {
        step: "Average monthly burn rate".to_string(),
        formula: format!(
            "{} ÷ {} months = {}/month",
            format_gbp(total_claimed_to_date),
            months_elapsed,
            format_gbp(average_monthly_burn)
        ),
        result: average_monthly_burn,
        notes: None,
    });

    let projected_total_cost =
        round2(average_monthly_burn.saturating_mul(Decimal::from(total_grant_months)));

    workings.push(CalculationWorking {
        step: "Projected total cost at current burn rate".to_string(),
        formula: format!(
            "{}/month × {} total months = {}",
            format_gbp(average_monthly_burn),
            total_grant_months,
            format_gbp(projected_total_cost)
        ),
        result: projected_total_cost,
        notes: None,
    });

    let projected_over_under_spend =
        round2(projected_total_cost.saturating_sub(grant.total_staff_budget));
    let note = if projected_over_under_spend > Decimal::ZERO {
        "Projected to overspend staff budget at current rate."
    } else if projected_over_under_spend < Decimal::ZERO {
        "Projected to underspend staff budget at current rate."
    } else {
        "Projected to spend exactly on budget."
    };

    workings.push(CalculationWorking {
        step: "Projected over/under spend".to_string(),
        formula: format!(
            "{} - {} = {}",
            format_gbp(projected_total_cost),
            format_gbp(grant.total_staff_budget),
            format_gbp(projected_over_under_spend)
        ),
        result: projected_over_under_spend,
        notes: Some(note.to_string()),
    });

    let tolerance = grant.total_staff_budget * BURN_RATE_TOLERANCE;
    let burn_rate_status = if projected_over_under_spend > tolerance {
        BurnRateStatus::Overspending
    } else if projected_over_under_spend < -tolerance {
        BurnRateStatus::Underspending
    } else {
        BurnRateStatus::OnTrack
    };

    BurnRateResult {
        grant_id: grant.id.clone(),
        grant_reference: grant.reference.clone(),
        total_staff_budget: grant.total_staff_budget,
        total_claimed_to_date,
        months_elapsed,
        months_remaining,
        average_monthly_burn,
        projected_total_cost,
        projected_over_under_spend,
        burn_rate_status,
        workings,
    }
}

/// [`calculate_burn_rate`] as of today's date in UTC.
pub fn calculate_burn_rate_now(
    grant: &Grant,
    calculation_results: &[CalculationResult],
) -> BurnRateResult {
    calculate_burn_rate(grant, calculation_results, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_grant(budget: &str) -> Grant {
        Grant {
            id: "g-1".to_string(),
            funder_profile_id: "ukri".to_string(),
            title: "Test Grant".to_string(),
            reference: "EP/X000001/1".to_string(),
            start_date: date(2025, 1, 1),
            end_date: date(2027, 12, 31),
            funded_fte: dec("0.5"),
            total_staff_budget: dec(budget),
            principal_investigator_id: "pi-1".to_string(),
            institution_id: "inst-1".to_string(),
        }
    }

    fn create_result(claimable: &str, month: u32) -> CalculationResult {
        CalculationResult {
            grant_id: "g-1".to_string(),
            researcher_id: "r-1".to_string(),
            period_year: 2025,
            period_month: month,
            project_hours: dec("14"),
            contracted_monthly_hours: dec("151.67"),
            effort_percentage: dec("0.0923"),
            monthly_salary: dec("4166.67"),
            salary_cost_charged: dec("384.62"),
            fec_rate: Some(dec("0.8")),
            claimable_cost: dec(claimable),
            workings: vec![],
            warnings: vec![],
        }
    }

    fn six_months_at(amount: &str) -> Vec<CalculationResult> {
        (1..=6).map(|m| create_result(amount, m)).collect()
    }

    #[test]
    fn test_oversized_claims_saturate_to_overspending() {
        let results = vec![
            create_result("79228162514264337593543950335", 1),
            create_result("79228162514264337593543950335", 2),
        ];

        let result = calculate_burn_rate(&create_grant("120000"), &results, date(2025, 7, 1));

        assert_eq!(result.total_claimed_to_date, Decimal::MAX);
        assert_eq!(result.projected_total_cost, Decimal::MAX);
        assert_eq!(result.burn_rate_status, BurnRateStatus::Overspending);
    }

    #[test]
    fn test_average_monthly_burn() {
        let result = calculate_burn_rate(
            &create_grant("120000"),
            &six_months_at("300"),
            date(2025, 7, 1),
        );

        assert_eq!(result.total_claimed_to_date, dec("1800"));
        assert_eq!(result.months_elapsed, 6);
        assert_eq!(result.average_monthly_burn, dec("300"));
    }

    #[test]
    fn test_projection_and_underspend() {
        let result = calculate_burn_rate(
            &create_grant("120000"),
            &six_months_at("300"),
            date(2025, 7, 1),
        );

        assert_eq!(result.projected_total_cost, dec("10500"));
        assert_eq!(result.projected_over_under_spend, dec("-109500"));
        assert_eq!(result.months_remaining, 29);
        assert_eq!(result.burn_rate_status, BurnRateStatus::Underspending);
        assert_eq!(
            result.workings[3].notes.as_deref(),
            Some("Projected to underspend staff budget at current rate.")
        );
    }

    #[test]
    fn test_on_track_within_tolerance() {
        let result = calculate_burn_rate(
            &create_grant("10000"),
            &six_months_at("300"),
            date(2025, 7, 1),
        );

        assert_eq!(result.projected_over_under_spend, dec("500"));
        assert_eq!(result.burn_rate_status, BurnRateStatus::OnTrack);
    }

    #[test]
    fn test_overspending() {
        let result = calculate_burn_rate(
            &create_grant("8000"),
            &six_months_at("300"),
            date(2025, 7, 1),
        );

        assert_eq!(result.burn_rate_status, BurnRateStatus::Overspending);
        assert_eq!(
            result.workings[3].notes.as_deref(),
            Some("Projected to overspend staff budget at current rate.")
        );
    }

    #[test]
    fn test_exactly_on_budget() {
        let result = calculate_burn_rate(
            &create_grant("10500"),
            &six_months_at("300"),
            date(2025, 7, 1),
        );

        assert_eq!(result.projected_over_under_spend, Decimal::ZERO);
        assert_eq!(result.burn_rate_status, BurnRateStatus::OnTrack);
        assert_eq!(
            result.workings[3].notes.as_deref(),
            Some("Projected to spend exactly on budget.")
        );
    }

    #[test]
    fn test_months_elapsed_floored_at_one() {
        let result = calculate_burn_rate(
            &create_grant("120000"),
            &[create_result("300", 1)],
            date(2024, 11, 15),
        );

        assert_eq!(result.months_elapsed, 1);
        assert_eq!(result.average_monthly_burn, dec("300"));
    }

    #[test]
    fn test_months_remaining_floored_at_zero() {
        let result = calculate_burn_rate(
            &create_grant("120000"),
            &six_months_at("300"),
            date(2029, 1, 1),
        );

        assert_eq!(result.months_remaining, 0);
    }

    #[test]
    fn test_average_uses_rounded_claimed_total() {
        let results = vec![create_result("100.005", 1), create_result("100.005", 2)];
        let result = calculate_burn_rate(&create_grant("120000"), &results, date(2025, 4, 1));

        assert_eq!(result.total_claimed_to_date, dec("200.01"));
        assert_eq!(result.average_monthly_burn, dec("66.67"));
        assert_eq!(result.projected_total_cost, dec("2333.45"));
    }

    #[test]
    fn test_workings_formulas() {
        let result = calculate_burn_rate(
            &create_grant("120000"),
            &six_months_at("300"),
            date(2025, 7, 1),
        );

        assert_eq!(result.workings.len(), 4);
        assert_eq!(
            result.workings[0].formula,
            "Sum of 6 monthly calculation(s) = £1,800.00"
        );
        assert_eq!(
            result.workings[1].formula,
            "£1,800.00 ÷ 6 months = £300.00/month"
        );
        assert_eq!(
            result.workings[2].formula,
            "£300.00/month × 35 total months = £10,500.00"
        );
        assert_eq!(
            result.workings[3].formula,
            "£10,500.00 - £120,000.00 = £-109,500.00"
        );
    }
}
