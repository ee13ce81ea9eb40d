//! Grant total aggregation.
//!
//! Sums monthly salary cost calculations for one grant across researchers.
//! Rounding happens in two stages: each researcher's total is rounded first,
//! then the rounded researcher totals are summed into the grant total.

use rust_decimal::Decimal;

use crate::models::{
    CalculationResult, CalculationWorking, FunderProfile, Grant, GrantTotalResult, Researcher,
    ResearcherTotal, TimesheetPeriod,
};

use super::rounding::{format_gbp, round2, saturating_div, saturating_sum};
use super::salary_cost::{CalculationInput, calculate_salary_cost};

/// Calculates the total claimable cost for a grant.
///
/// For each researcher, in input order, every period belonging to them that
/// has an entry for the grant is run through [`calculate_salary_cost`].
/// Researchers with no such periods are left out of the breakdown.
pub fn calculate_grant_total(
    grant: &Grant,
    periods: &[TimesheetPeriod],
    researchers: &[Researcher],
    funder_profile: &FunderProfile,
) -> GrantTotalResult {
    let mut workings = Vec::new();
    let mut by_researcher = Vec::new();
    let mut total_claimable_cost = Decimal::ZERO;

    for researcher in researchers {
        let monthly_breakdown: Vec<CalculationResult> = periods
            .iter()
            .filter(|p| p.researcher_id == researcher.id && p.has_entry_for(&grant.id))
            .map(|period| {
                calculate_salary_cost(&CalculationInput {
                    period,
                    researcher,
                    grant,
                    funder_profile,
                })
            })
            .collect();

        if monthly_breakdown.is_empty() {
            continue;
        }

        let researcher_total =
            round2(saturating_sum(monthly_breakdown.iter().map(|r| r.claimable_cost)));

        workings.push(CalculationWorking {
            step: format!("Total for {}", researcher.name),
            formula: format!(
                "Sum of {} monthly calculations = {}",
                monthly_breakdown.len(),
                format_gbp(researcher_total)
            ),
            result: researcher_total,
            notes: None,
        });

        total_claimable_cost = total_claimable_cost.saturating_add(researcher_total);
        by_researcher.push(ResearcherTotal {
            researcher_id: researcher.id.clone(),
            researcher_name: researcher.name.clone(),
            total_claimable: researcher_total,
            monthly_breakdown,
        });
    }

    let total_claimable_cost = round2(total_claimable_cost);
    let percent_budget_used = if grant.total_staff_budget > Decimal::ZERO {
        round2(
            saturating_div(total_claimable_cost, grant.total_staff_budget)
                .saturating_mul(Decimal::ONE_HUNDRED),
        )
    } else {
        Decimal::ZERO
    };

    workings.push(CalculationWorking {
        step: "Grant total claimable cost".to_string(),
        formula: format!(
            "Sum across {} researcher(s) = {}",
            by_researcher.len(),
            format_gbp(total_claimable_cost)
        ),
        result: total_claimable_cost,
        notes: None,
    });

    workings.push(CalculationWorking {
        step: "Budget utilisation".to_string(),
        formula: format!(
            "{} ÷ {} = {}%",
            format_gbp(total_claimable_cost),
            format_gbp(grant.total_staff_budget),
            percent_budget_used.normalize()
        ),
        result: percent_budget_used,
        notes: None,
    });

    GrantTotalResult {
        grant_id: grant.id.clone(),
        grant_reference: grant.reference.clone(),
        total_claimable_cost,
        total_staff_budget: grant.total_staff_budget,
        percent_budget_used,
        by_researcher,
        workings,
    }
}
