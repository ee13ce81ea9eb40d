//! UKRI-TS-006: FTE consistency.
//!
//! Over a rolling window of the current month and the five before it, the
//! average monthly effort on each grant should sit within 25% of the grant's
//! funded FTE. Grants with fewer than three periods in the window are skipped.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::calculation::{format_number, round2, round3, saturating_div, saturating_sum};
use crate::models::{Severity, TimesheetPeriod, ValidationResult};

use super::{UkriRule, ValidationContext};

/// Length of the rolling window, including the current month.
pub const FTE_WINDOW_MONTHS: i64 = 6;

const MIN_QUALIFYING_PERIODS: usize = 3;
const LOWER_FACTOR: Decimal = Decimal::from_parts(75, 0, 0, false, 2);
const UPPER_FACTOR: Decimal = Decimal::from_parts(125, 0, 0, false, 2);

#[derive(Debug, Serialize)]
struct FteDeviation<'a> {
    grant_id: &'a str,
    grant_reference: &'a str,
    funded_fte: Decimal,
    average_fte: Decimal,
    qualifying_periods: usize,
    deviation: &'static str,
}

/// Periods in the window ending at `current` that have an entry for `grant_id`.
fn relevant_periods<'p>(
    current: &TimesheetPeriod,
    all_periods: &'p [TimesheetPeriod],
    grant_id: &str,
) -> Vec<&'p TimesheetPeriod> {
    let current_index = current.month_index();
    let window_start = current_index - (FTE_WINDOW_MONTHS - 1);

    all_periods
        .iter()
        .filter(|p| (window_start..=current_index).contains(&p.month_index()))
        .filter(|p| p.has_entry_for(grant_id))
        .collect()
}

pub(super) fn evaluate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let rule = UkriRule::FteConsistency;
    let contracted_monthly_hours = ctx.researcher.contracted_monthly_hours();

    if contracted_monthly_hours <= Decimal::ZERO {
        return rule.result(
            Severity::Warning,
            true,
            "Cannot assess FTE consistency: researcher has no contracted hours recorded. Check \
             not applicable."
                .to_string(),
            json!({
                "warnings": [],
                "contracted_monthly_hours": Decimal::ZERO,
                "window_months": FTE_WINDOW_MONTHS,
            }),
        );
    }

    let mut deviations = Vec::new();
    for grant in ctx.grants {
        let periods = relevant_periods(ctx.period, ctx.all_periods, &grant.id);
        if periods.len() < MIN_QUALIFYING_PERIODS {
            continue;
        }

        let total_hours = saturating_sum(periods.iter().map(|p| p.hours_for(&grant.id)));
        let average_monthly_hours = total_hours / Decimal::from(periods.len());
        let average_fte = saturating_div(average_monthly_hours, contracted_monthly_hours);

        let deviation = if average_fte < grant.funded_fte * LOWER_FACTOR {
            "under-allocated"
        } else if average_fte > grant.funded_fte.saturating_mul(UPPER_FACTOR) {
            "over-allocated"
        } else {
            continue;
        };

        deviations.push(FteDeviation {
            grant_id: &grant.id,
            grant_reference: &grant.reference,
            funded_fte: grant.funded_fte,
            average_fte: round3(average_fte),
            qualifying_periods: periods.len(),
            deviation,
        });
    }

    let passed = deviations.is_empty();
    let message = if passed {
        "Grant allocations are consistent with funded FTE over the rolling window.".to_string()
    } else {
        format!(
            "{} grant(s) show inconsistent FTE allocation: {}.",
            deviations.len(),
            deviations
                .iter()
                .map(|d| format!(
                    "{} (funded {} FTE, actual {} FTE: {})",
                    d.grant_reference,
                    format_number(d.funded_fte),
                    format_number(d.average_fte),
                    d.deviation
                ))
                .collect::<Vec<_>>()
                .join("; ")
        )
    };

    rule.result(
        Severity::Warning,
        passed,
        message,
        json!({
            "warnings": deviations,
            "contracted_monthly_hours": round2(contracted_monthly_hours),
            "window_months": FTE_WINDOW_MONTHS,
        }),
    )
}
