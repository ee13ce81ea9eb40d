//! UKRI-TS-004: total hours plausibility.
//!
//! Grant plus non-grant hours for the month should land within 20% of the
//! researcher's contracted monthly hours.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::json;

use crate::calculation::round2;
use crate::models::{Severity, ValidationResult};

use super::{UkriRule, ValidationContext};

const LOWER_FACTOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1);
const UPPER_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

fn one_dp(value: Decimal) -> String {
    format!(
        "{:.1}",
        value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub(super) fn evaluate(ctx: &ValidationContext<'_>) -> ValidationResult {
    let rule = UkriRule::HoursPlausibility;
    let researcher = ctx.researcher;

    let contracted_monthly_hours = researcher.contracted_monthly_hours();
    if contracted_monthly_hours <= Decimal::ZERO {
        let message = if researcher.contracted_hours_weekly > Decimal::ZERO {
            "Cannot assess hours plausibility: contracted hours are too large to convert to \
             monthly hours."
        } else {
            "Cannot assess hours plausibility: researcher has no contracted hours recorded."
        };
        return rule.result(
            Severity::Warning,
            false,
            message.to_string(),
            json!({ "contracted_hours_weekly": researcher.contracted_hours_weekly }),
        );
    }

    let grant_hours = ctx.period.grant_hours();
    let non_grant_hours = ctx.period.non_grant_hours();
    let total_hours = grant_hours.saturating_add(non_grant_hours);

    let lower_bound = contracted_monthly_hours * LOWER_FACTOR;
    let upper_bound = contracted_monthly_hours.saturating_mul(UPPER_FACTOR);
    let passed = total_hours >= lower_bound && total_hours <= upper_bound;

    let message = if passed {
        format!(
            "Total hours ({}) are within plausible range of contracted hours ({} ±20%).",
            one_dp(total_hours),
            one_dp(contracted_monthly_hours)
        )
    } else if total_hours < lower_bound {
        format!(
            "Total hours ({}) are significantly below contracted hours ({}). Expected at least \
             {} hours. Researcher may be under-reporting or on leave.",
            one_dp(total_hours),
            one_dp(contracted_monthly_hours),
            one_dp(lower_bound)
        )
    } else {
        format!(
            "Total hours ({}) significantly exceed contracted hours ({}). Expected at most {} \
             hours. Review for accuracy.",
            one_dp(total_hours),
            one_dp(contracted_monthly_hours),
            one_dp(upper_bound)
        )
    };

    rule.result(
        Severity::Warning,
        passed,
        message,
        json!({
            "total_hours": total_hours,
            "grant_hours": grant_hours,
            "non_grant_hours": non_grant_hours,
            "contracted_monthly_hours": round2(contracted_monthly_hours),
            "lower_bound": round2(lower_bound),
            "upper_bound": round2(upper_bound),
            "contracted_hours_weekly": researcher.contracted_hours_weekly,
        }),
    )
}
