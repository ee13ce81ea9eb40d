//! UKRI-TS-007: combined FTE cap.
//!
//! Effort charged across all grants in a month cannot exceed the researcher's
//! employment fraction. Someone employed at 0.8 FTE cannot charge 0.5 FTE to
//! each of two grants.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::calculation::{format_number, round2, round3, saturating_div, saturating_sum};
use crate::models::{Severity, ValidationResult};

use super::{UkriRule, ValidationContext};

/// Allowance for rounding when comparing against the employment fraction.
const FTE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

#[derive(Debug, Serialize)]
struct GrantAllocation<'a> {
    grant_id: &'a str,
    grant_reference: &'a str,
    hours: Decimal,
    fte: Decimal,
}

pub(super) fn evaluate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let rule = UkriRule::CombinedFteCap;
    let researcher = ctx.researcher;
    let contracted_monthly_hours = researcher.contracted_monthly_hours();

    if contracted_monthly_hours <= Decimal::ZERO {
        let total_hours = saturating_sum(ctx.grants.iter().map(|g| ctx.period.hours_for(&g.id)));
        let passed = total_hours.is_zero();
        let message = if passed {
            "No hours recorded and no contracted hours. Check not applicable."
        } else {
            "Cannot calculate FTE: researcher has no contracted hours recorded, but hours have \
             been charged to grants."
        };

        return rule.result(
            Severity::Error,
            passed,
            message.to_string(),
            json!({
                "contracted_monthly_hours": Decimal::ZERO,
                "total_grant_hours": total_hours,
                "employment_fraction": researcher.employment_fraction,
            }),
        );
    }

    let allocations: Vec<GrantAllocation<'_>> = ctx
        .grants
        .iter()
        .map(|grant| {
            let hours = ctx.period.hours_for(&grant.id);
            GrantAllocation {
                grant_id: &grant.id,
                grant_reference: &grant.reference,
                hours,
                fte: round3(saturating_div(hours, contracted_monthly_hours)),
            }
        })
        .collect();

    let total_grant_fte = round3(saturating_sum(allocations.iter().map(|a| a.fte)));
    let fraction = researcher.employment_fraction;
    let passed = total_grant_fte <= fraction.saturating_add(FTE_TOLERANCE);

    let message = if passed {
        format!(
            "Combined grant FTE ({}) is within employment fraction ({}).",
            format_number(total_grant_fte),
            format_number(fraction)
        )
    } else {
        format!(
            "Combined grant FTE ({}) exceeds employment fraction ({}). Excess effort of {:.3} FTE \
             cannot be charged to grants.",
            format_number(total_grant_fte),
            format_number(fraction),
            round3(total_grant_fte.saturating_sub(fraction))
        )
    };

    rule.result(
        Severity::Error,
        passed,
        message,
        json!({
            "grant_allocations": allocations,
            "total_grant_fte": total_grant_fte,
            "employment_fraction": fraction,
            "contracted_monthly_hours": round2(contracted_monthly_hours),
        }),
    )
}
